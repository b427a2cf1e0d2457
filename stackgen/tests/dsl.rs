//! End-to-end tests for the DSL generated from `specs/demo` by `build.rs`.

#[allow(dead_code)]
mod demo {
    include!(concat!(env!("OUT_DIR"), "/demo.rs"));
}

use demo::property::lambda::function::Environment;
use demo::property::sns::topic::subscription;
use demo::property::sqs::queue::RedriveTarget;
use demo::property::{Tag, tag};
use demo::resource::{Function, Queue, Topic, function, queue, topic};
use stackgen::core::{Deferred, Error};
use stackgen::{Resource, TemplateBuilder, Value};
use std::collections::BTreeMap;

#[test]
fn test_helpers_allocate_logical_names() {
    let mut template = TemplateBuilder::new();

    let first = topic(&mut template, None, None, |b| b).expect("register failed");
    let second = topic(&mut template, None, None, |b| b).expect("register failed");
    let named = topic(&mut template, Some("Alerts".to_string()), None, |b| b)
        .expect("register failed");

    assert_eq!(first.logical_name(), "Topic");
    assert_eq!(second.logical_name(), "Topic2");
    assert_eq!(named.logical_name(), "Alerts");
    assert_eq!(template.len(), 3);
    assert!(template.contains("Topic2"));
}

#[test]
fn test_duplicate_logical_name_is_rejected() {
    let mut template = TemplateBuilder::new();
    queue(&mut template, Some("Dlq".to_string()), None, |b| b).expect("register failed");

    let err = queue(&mut template, Some("Dlq".to_string()), None, |b| b).unwrap_err();
    assert!(matches!(err, Error::DuplicateLogicalName { .. }));
    assert_eq!(template.len(), 1);
}

#[test]
fn test_current_dependee_applies_without_explicit_dependencies() {
    let mut template = TemplateBuilder::new();
    template.set_current_dependee(Some(vec!["Network".to_string()]));

    let implicit = queue(&mut template, None, None, |b| b).expect("register failed");
    let explicit = queue(
        &mut template,
        None,
        Some(vec!["Database".to_string()]),
        |b| b,
    )
    .expect("register failed");

    assert_eq!(implicit.depends_on(), Some(&["Network".to_string()][..]));
    assert_eq!(explicit.depends_on(), Some(&["Database".to_string()][..]));
}

#[test]
fn test_earlier_document_wins() {
    // `TopicName` is optional in the base document and required in the
    // overrides; the base wins, so the factory does not ask for it.
    let topic = Topic::create("Alerts".to_string(), None).build();
    assert_eq!(topic.topic_name, None);
    // Fields only the overrides declare are still merged in.
    assert_eq!(topic.display_name, None);
    assert_eq!(Topic::RESOURCE_TYPE, "AWS::SNS::Topic");

    let queue = Queue::create("Jobs".to_string(), None).tags(Vec::new()).build();
    assert_eq!(queue.tags, Some(Vec::new()));
    assert_eq!(queue.queue_name(), Value::attribute("Jobs", "QueueName"));
}

#[test]
fn test_scalar_setters_wrap_values() {
    let topic = Topic::create("Alerts".to_string(), None)
        .topic_name("alerts".to_string())
        .display_name_value(Value::parameter("DisplayName"))
        .build();

    assert_eq!(topic.topic_name, Some(Value::Of("alerts".to_string())));
    assert_eq!(
        topic.display_name,
        Some(Value::Deferred(Deferred::Parameter("DisplayName".to_string())))
    );

    let worker = Function::create(
        "Worker".to_string(),
        Value::of("index.handler"),
        Value::of("arn:aws:iam::123456789012:role/worker"),
        None,
    )
    .layers(vec!["base".to_string(), "extras".to_string()])
    .timeout(30)
    .build();

    assert_eq!(
        worker.layers,
        Some(vec![
            Value::Of("base".to_string()),
            Value::Of("extras".to_string())
        ])
    );
    assert_eq!(worker.timeout, Some(Value::Of(30)));
}

#[test]
fn test_nested_setters_build_in_place() {
    let mut template = TemplateBuilder::new();
    let dlq = queue(&mut template, Some("Dlq".to_string()), None, |b| b).expect("register failed");

    let jobs = queue(&mut template, Some("Jobs".to_string()), None, |b| {
        b.delay_seconds(5)
            .redrive_policy_with(dlq.arn(), Value::of(3), |policy| policy)
    })
    .expect("register failed");

    assert_eq!(jobs.delay_seconds, Some(Value::Of(5)));
    assert_eq!(
        jobs.redrive_policy,
        Some(RedriveTarget::new(
            Value::attribute("Dlq", "Arn"),
            Value::Of(3)
        ))
    );

    let variables = BTreeMap::from([("STAGE".to_string(), "prod".to_string())]);
    let worker = function(
        &mut template,
        Value::of("index.handler"),
        Value::of("arn:aws:iam::123456789012:role/worker"),
        None,
        None,
        |b| b.environment_with(|env| env.variables(variables)),
    )
    .expect("register failed");

    let expected = Environment::new(Some(BTreeMap::from([(
        "STAGE".to_string(),
        Value::Of("prod".to_string()),
    )])));
    assert_eq!(worker.environment, Some(expected));
    assert_eq!(worker.logical_name(), "Function");
}

#[test]
fn test_property_helpers_do_not_register() {
    let mut template = TemplateBuilder::new();
    let owner = tag(Value::of("team"), Value::of("infra"), |b| b);
    let email = subscription(Value::of("ops@example.com"), Value::of("email"), |b| b);

    let alerts = topic(&mut template, None, None, |b| {
        b.tags(vec![owner.clone()]).subscription(vec![email.clone()])
    })
    .expect("register failed");

    assert_eq!(template.len(), 1);
    assert_eq!(
        alerts.tags,
        Some(vec![Tag::new(Value::of("team"), Value::of("infra"))])
    );
    assert_eq!(alerts.subscription, Some(vec![email]));
}

#[test]
fn test_builder_matches_full_constructor() {
    let built = Function::create(
        "Worker".to_string(),
        Value::of("index.handler"),
        Value::of("role"),
        Some(vec!["Dlq".to_string()]),
    )
    .timeout(10)
    .build();

    let constructed = Function::new(
        "Worker".to_string(),
        Value::of("index.handler"),
        Value::of("role"),
        None,
        None,
        Some(Value::Of(10)),
        Some(vec!["Dlq".to_string()]),
    );
    assert_eq!(built, constructed);
    assert_eq!(built.resource_type(), "AWS::Lambda::Function");
    assert_eq!(built.reference(), Value::reference("Worker"));
}
