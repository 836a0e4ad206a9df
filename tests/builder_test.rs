//! Tests for assembling the annotator from settings

use std::sync::Arc;

use cancerrag::{
	config::ConfigurableValue,
	mocks::{MockCompletionClient, StaticEvidenceAdapter},
	types::PathogenicityEvidence,
	Annotator, AnnotatorBuilder, BuildError, CompletionClient, Evidence, EvidenceSource, Settings,
	VariantQuery,
};

fn settings_with_key(api_key: ConfigurableValue) -> Settings {
	let mut settings = Settings::default();
	settings.completion.api_key = api_key;
	settings
}

#[test]
fn test_missing_credential_is_fatal() {
	let settings =
		settings_with_key(ConfigurableValue::from_env("CANCERRAG_BUILDER_TEST_MISSING_KEY"));

	match AnnotatorBuilder::new().with_settings(settings).build() {
		Err(BuildError::CredentialMissing(e)) => {
			assert!(e.to_string().contains("CANCERRAG_BUILDER_TEST_MISSING_KEY"))
		},
		other => panic!("expected missing credential, got {:?}", other.map(|_| ())),
	}
}

#[test]
fn test_credential_from_environment() {
	std::env::set_var("CANCERRAG_BUILDER_TEST_KEY", "sk-env");
	let settings = settings_with_key(ConfigurableValue::from_env("CANCERRAG_BUILDER_TEST_KEY"));
	let annotator = AnnotatorBuilder::new().with_settings(settings).build();
	std::env::remove_var("CANCERRAG_BUILDER_TEST_KEY");

	let annotator = annotator.unwrap();
	assert_eq!(annotator.settings().completion.model, "gpt-4o-mini");
}

#[test]
fn test_supplied_client_needs_no_credential() {
	let settings =
		settings_with_key(ConfigurableValue::from_env("CANCERRAG_BUILDER_TEST_MISSING_KEY"));
	let completion = MockCompletionClient::replying("{}");

	let annotator = Annotator::builder()
		.with_settings(settings)
		.with_completion_client(Arc::new(completion))
		.build()
		.unwrap();
	assert_eq!(annotator.service().generation().max_tokens, 500);
}

#[test]
fn test_invalid_settings_are_rejected() {
	let mut settings = settings_with_key(ConfigurableValue::from_plain("sk-plain"));
	settings.completion.max_tokens = 0;

	assert!(matches!(
		AnnotatorBuilder::new().with_settings(settings).build(),
		Err(BuildError::InvalidConfig(_))
	));
}

#[test]
fn test_builder_keeps_settings() {
	let mut settings = settings_with_key(ConfigurableValue::from_plain("sk-plain"));
	settings.completion.temperature = 0.4;

	let builder = AnnotatorBuilder::new().with_settings(settings);
	assert_eq!(builder.settings().unwrap().completion.temperature, 0.4);

	let annotator = builder.build().unwrap();
	assert_eq!(annotator.service().generation().temperature, 0.4);
}

#[tokio::test]
async fn test_custom_adapter_replaces_configured_source() {
	let evidence = Evidence::OncoKb(PathogenicityEvidence::from_level(Some(
		"LEVEL_3A".to_string(),
	)));
	let mut settings = settings_with_key(ConfigurableValue::from_plain("sk-plain"));
	settings.sources.civic.endpoint = "http://127.0.0.1:1/graphql".to_string();
	settings.sources.clinical_trials.endpoint = "http://127.0.0.1:1/studies".to_string();

	let annotator = AnnotatorBuilder::new()
		.with_settings(settings)
		.with_adapter(Arc::new(StaticEvidenceAdapter::new(evidence)))
		.build()
		.unwrap();

	let bundle = annotator
		.gather_evidence(&VariantQuery::new("PIK3CA", "H1047R"))
		.await;
	assert_eq!(bundle.pathogenicity.level.as_deref(), Some("LEVEL_3A"));
	assert_eq!(bundle.curation.evidence_count, 0);
	assert_eq!(bundle.trials.trial_count, 0);
}

#[test]
fn test_default_completion_client_uses_configured_model() {
	let mut settings = settings_with_key(ConfigurableValue::from_plain("sk-plain"));
	settings.completion.model = "gpt-4o".to_string();

	let annotator = AnnotatorBuilder::new().with_settings(settings).build().unwrap();
	let client: &dyn CompletionClient = annotator.service().completion_client();
	assert_eq!(client.model(), "gpt-4o");
	assert!(annotator
		.service()
		.adapter_registry()
		.get(EvidenceSource::Civic)
		.is_some());
}
