//! End-to-end scenarios through `MedicalRag::handle_query`.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use medrag_model::MockModel;
use medrag_rag::{
    Corpus, DISCLAIMER, Document, MedicalRag, NO_CONTEXT_REFUSAL, RagConfig, RagError, SourceRef,
};

fn flu_corpus() -> Corpus {
    Corpus::new(vec![Document::new(
        "d1",
        "Flu",
        "Fever and cough are symptoms of flu.",
        ["flu", "fever"],
    )])
}

fn offline(corpus: Corpus) -> MedicalRag {
    MedicalRag::builder().corpus(corpus).build().unwrap()
}

#[tokio::test]
async fn fever_question_without_model_uses_fallback() {
    let result = offline(flu_corpus()).handle_query("I have a fever").await.unwrap();

    assert_eq!(result.sources, vec![SourceRef { id: "d1".into(), title: "Flu".into() }]);
    assert!(result.answer.contains("Flu"));
    assert!(result.answer.contains(DISCLAIMER));
}

#[tokio::test]
async fn fever_question_with_model_returns_model_text() {
    let reply = format!("Flu commonly causes fever.\n\n{DISCLAIMER}");
    let model = Arc::new(MockModel::replying(reply));
    let pipeline = MedicalRag::builder().corpus(flu_corpus()).model(model.clone()).build().unwrap();

    let result = pipeline.handle_query("I have a fever").await.unwrap();

    assert!(result.answer.starts_with("Flu commonly causes fever."));
    assert_eq!(result.sources.len(), 1);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn weather_question_is_refused() {
    let model = Arc::new(MockModel::replying("sunny"));
    let pipeline = MedicalRag::builder().corpus(flu_corpus()).model(model.clone()).build().unwrap();

    let result = pipeline.handle_query("what is the weather today").await.unwrap();

    assert_eq!(result.answer, NO_CONTEXT_REFUSAL);
    assert!(result.sources.is_empty());
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn empty_query_is_invalid_input() {
    let err = offline(flu_corpus()).handle_query("").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
}

#[tokio::test]
async fn empty_corpus_refuses_everything() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::load_or_empty(dir.path().join("medical_dataset.json"));
    let pipeline = offline(corpus);

    assert_eq!(pipeline.health().documents_loaded, 0);
    let result = pipeline.handle_query("I have a fever").await.unwrap();
    assert_eq!(result.answer, NO_CONTEXT_REFUSAL);
}

#[tokio::test]
async fn failing_model_degrades_to_fallback() {
    let pipeline = MedicalRag::builder()
        .corpus(flu_corpus())
        .model(Arc::new(MockModel::failing("503 Service Unavailable")))
        .build()
        .unwrap();

    let result = pipeline.handle_query("fever").await.unwrap();
    assert!(result.answer.starts_with("Based on the medical information I found:"));
    assert!(result.answer.ends_with(DISCLAIMER));
}

#[tokio::test(start_paused = true)]
async fn slow_model_degrades_to_fallback() {
    let config = RagConfig::builder().model_timeout(Duration::from_secs(1)).build().unwrap();
    let pipeline = MedicalRag::builder()
        .config(config)
        .corpus(flu_corpus())
        .model(Arc::new(MockModel::delayed(Duration::from_secs(10), "late")))
        .build()
        .unwrap();

    let result = pipeline.handle_query("fever").await.unwrap();
    assert!(result.answer.ends_with(DISCLAIMER));
    assert_ne!(result.answer, "late");
}

#[tokio::test]
async fn sources_are_capped_at_five() {
    let documents = (0..20)
        .map(|i| Document::new(format!("d{i}"), format!("Cold variant {i}"), "", ["cold"]))
        .collect();
    let config = RagConfig::builder().top_k(20).max_sources(20).build().unwrap();
    let pipeline =
        MedicalRag::builder().config(config).corpus(Corpus::new(documents)).build().unwrap();

    assert_eq!(pipeline.retrieve("cold").len(), 20);
    let result = pipeline.handle_query("cold").await.unwrap();
    assert_eq!(result.sources.len(), 5);
    // Equal scores keep corpus order.
    let ids: Vec<_> = result.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["d0", "d1", "d2", "d3", "d4"]);
    assert!(result.answer.contains("from 20 medical source(s)"));
}

#[tokio::test]
async fn loads_dataset_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": "asthma", "title": "Asthma", "content": "Wheezing and shortness of breath.", "keywords": ["asthma", "wheezing", "breath"]}},
            {{"id": "flu", "title": "Flu", "content": "Fever and cough.", "keywords": ["flu", "fever"]}}]"#
    )
    .unwrap();

    let pipeline = offline(Corpus::load(file.path()).unwrap());
    assert_eq!(pipeline.catalog().total, 2);

    let result = pipeline.handle_query("Why am I wheezing?").await.unwrap();
    assert_eq!(result.sources[0].id, "asthma");
}
