use servicebus_entities::{
    EntityNameHelper, LifecycleConfig, NamingConvention, NamingError, TopicNameConvention,
    TypeDescriptor,
};

mod contracts {
    pub struct InvoiceIssued;
}

#[test]
fn modern_topic_keeps_case_periods_and_hyphens() {
    let helper = EntityNameHelper::new(NamingConvention::Modern);
    let descriptor = TypeDescriptor::new("Billing-Service", "Billing.Contracts.InvoiceIssued");

    assert_eq!(
        helper.topic_for(&descriptor),
        "Billing-Service/Billing.Contracts.InvoiceIssued"
    );
}

#[test]
fn legacy_topic_flattens_the_qualified_name() {
    let helper = EntityNameHelper::legacy();
    let descriptor = TypeDescriptor::new("Billing-Service", "Billing.Contracts.InvoiceIssued");

    assert_eq!(
        helper.topic_for(&descriptor),
        "billing_contracts_invoiceissued__billing_service"
    );
}

#[test]
fn topic_for_rust_types_validates_under_both_conventions() {
    let descriptor = TypeDescriptor::of::<contracts::InvoiceIssued>();

    for convention in [NamingConvention::Modern, NamingConvention::Legacy] {
        let helper = EntityNameHelper::new(convention);
        let topic = helper.topic_for(&descriptor);

        assert!(
            helper.validate_queue_name(&topic).is_ok(),
            "{convention} topic {topic} should validate"
        );
    }
}

#[test]
fn sanitized_names_always_validate() {
    let inputs = [
        "orders queue",
        "Orders.Priority-High",
        "tenant a/orders #1",
        "Ünïcode/ÅSB İstanbul",
        "",
    ];

    for convention in [NamingConvention::Modern, NamingConvention::Legacy] {
        let helper = EntityNameHelper::new(convention);
        for input in inputs {
            let sanitized = helper.sanitize(input);
            assert!(
                helper.validate_queue_name(&sanitized).is_ok(),
                "{convention} sanitize({input:?}) = {sanitized:?} should validate"
            );
        }
    }
}

#[test]
fn validation_error_names_the_offending_entity() {
    let helper = EntityNameHelper::legacy();

    let error = helper
        .validate_queue_name("tenant/orders.v2")
        .expect_err("periods are not valid legacy characters");

    let NamingError::InvalidEntityName { name, convention, .. } = &error;
    assert_eq!(name, "tenant/orders.v2");
    assert_eq!(*convention, NamingConvention::Legacy);
    assert!(error.to_string().contains("'tenant/orders.v2'"));
}

#[test]
fn config_entity_names_follow_the_configured_convention() {
    let config = LifecycleConfig::from_json5_str(
        r#"{
            connection_string: "Endpoint=sb://x/",
            naming: "legacy",
            entity_name_suffix: "Build.17",
        }"#,
    )
    .expect("config should parse");

    let name = config.entity_name("Timeouts").expect("valid entity name");

    assert_eq!(name, "timeouts_build_17");
    assert!(config.name_helper().validate_queue_name(&name).is_ok());
}
