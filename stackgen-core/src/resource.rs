//! Resource identity shared by all generated resource types.

use crate::value::Value;

/// A generated resource instance.
///
/// Implementations are generated; the trait carries the identity the
/// template system needs (logical name, type discriminator, dependencies).
pub trait Resource {
    /// Unique name of this instance within its template.
    fn logical_name(&self) -> &str;

    /// Schema type name, e.g. `AWS::S3::Bucket`.
    fn resource_type(&self) -> &'static str;

    /// Logical names this resource depends on.
    fn depends_on(&self) -> Option<&[String]>;

    /// Deferred reference to this resource.
    fn reference(&self) -> Value<String> {
        Value::reference(self.logical_name())
    }

    /// Deferred reference to one of this resource's attributes.
    fn attribute(&self, attribute: &str) -> Value<String> {
        Value::attribute(self.logical_name(), attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Deferred;

    struct Queue {
        logical_name: String,
        depends_on: Option<Vec<String>>,
    }

    impl Resource for Queue {
        fn logical_name(&self) -> &str {
            &self.logical_name
        }

        fn resource_type(&self) -> &'static str {
            "AWS::SQS::Queue"
        }

        fn depends_on(&self) -> Option<&[String]> {
            self.depends_on.as_deref()
        }
    }

    #[test]
    fn test_reference_uses_logical_name() {
        let queue = Queue {
            logical_name: "Jobs".to_string(),
            depends_on: None,
        };
        assert_eq!(
            queue.reference(),
            Value::Deferred(Deferred::Reference("Jobs".to_string()))
        );
    }

    #[test]
    fn test_attribute_binds_logical_name() {
        let queue = Queue {
            logical_name: "Jobs".to_string(),
            depends_on: Some(vec!["Topic".to_string()]),
        };
        assert_eq!(queue.attribute("Arn"), Value::attribute("Jobs", "Arn"));
        assert_eq!(queue.depends_on(), Some(&["Topic".to_string()][..]));
    }
}
