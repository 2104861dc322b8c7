use std::sync::{Arc, Mutex};

use trace_agent_operation_ast::operation::OperationDocument;

use crate::agent::TraceAgent;
use crate::context::RequestOperations;
use crate::listener::TransactionListener;
use crate::transaction::FinishedTransaction;

fn parse_operation(source: &str) -> OperationDocument {
    let parsed = graphql_parser::parse_query::<String>(source).expect("failed to parse operation");
    OperationDocument::from_document(&parsed, None)
        .expect("failed to construct operation document")
}

#[derive(Default)]
struct CollectingListener {
    finished: Mutex<Vec<FinishedTransaction>>,
}

impl CollectingListener {
    fn finished(&self) -> Vec<FinishedTransaction> {
        self.finished.lock().unwrap().clone()
    }
}

impl TransactionListener for CollectingListener {
    fn on_finished(&self, transaction: &FinishedTransaction) {
        self.finished.lock().unwrap().push(transaction.clone());
    }
}

fn agent_with_listener() -> (TraceAgent, Arc<CollectingListener>) {
    let listener = Arc::new(CollectingListener::default());
    let agent = TraceAgent::builder()
        .framework_name("Expressjs".to_string())
        .listener(listener.clone())
        .build()
        .unwrap();
    (agent, listener)
}

#[test]
fn finished_transaction_is_published_once_with_its_name() {
    let (agent, listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Single(parse_operation(
        "query booksInStock { libraries { branch booksInStock { title author } } }",
    )));
    let finished = context.finish();

    assert_eq!(
        finished.name.as_deref(),
        Some("WebTransaction/Expressjs/POST//query/booksInStock/libraries.booksInStock.title")
    );

    let published = listener.finished();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, finished.id);
    assert_eq!(published[0].name, finished.name);
}

#[test]
fn batch_transport_uses_the_batch_name_form() {
    let (agent, listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Batch(vec![parse_operation(
        "query GetBooksForLibraries { libraries { branch booksInStock { isbn title author } } }",
    )]));
    let finished = context.finish();

    assert_eq!(
        finished.name.as_deref(),
        Some("WebTransaction/Expressjs/POST//batch/query/GetBooksForLibraries/libraries.booksInStock.isbn")
    );
    assert_eq!(listener.finished().len(), 1);
}

#[test]
fn force_ignored_transaction_is_published_without_a_name() {
    let (agent, listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Single(parse_operation(
        "query { libraries { branch } }",
    )));
    context.mark_force_ignored();
    let finished = context.finish();

    assert!(!finished.should_name());
    assert_eq!(finished.name, None);

    // Listeners still see the record; the filter tells them to skip it.
    let published = listener.finished();
    assert_eq!(published.len(), 1);
    assert!(!published[0].should_name());
}

#[test]
fn aborted_transaction_never_reaches_listeners() {
    let (agent, listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Single(parse_operation(
        "query { libraries { branch } }",
    )));
    drop(context);

    assert!(listener.finished().is_empty());
}

#[test]
fn finish_without_operations_leaves_the_name_unset() {
    let (agent, listener) = agent_with_listener();

    let finished = agent.begin_transaction().finish();

    assert_eq!(finished.name, None);
    assert!(finished.should_name());
    assert_eq!(listener.finished().len(), 1);
}

#[test]
fn repeat_operation_attachment_is_dropped() {
    let (agent, _listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Single(parse_operation(
        "query First { libraries { branch } }",
    )));
    context.set_operations(RequestOperations::Single(parse_operation(
        "query Second { libraries { branch } }",
    )));
    let finished = context.finish();

    assert_eq!(
        finished.name.as_deref(),
        Some("WebTransaction/Expressjs/POST//query/First/libraries.branch")
    );
}

#[test]
fn finished_record_serializes_for_exporters() {
    let (agent, _listener) = agent_with_listener();

    let mut context = agent.begin_transaction();
    context.set_operations(RequestOperations::Single(parse_operation(
        "query { libraries { branch } }",
    )));
    let finished = context.finish();

    let json = serde_json::to_value(&finished).unwrap();
    assert_eq!(
        json["name"],
        "WebTransaction/Expressjs/POST//query/<anonymous>/libraries.branch"
    );
    assert_eq!(json["force_ignore"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn interleaved_requests_keep_their_own_documents() {
    let (agent, listener) = agent_with_listener();

    let mut handles = Vec::new();
    for i in 0..64usize {
        let agent = agent.clone();
        handles.push(tokio::spawn(async move {
            let mut context = agent.begin_transaction();

            // Parsing and execution of concurrent requests interleave
            // arbitrarily; the context owns its document either way.
            tokio::task::yield_now().await;

            let source = format!(
                "query Operation{i} {{ shelf{i} {{ books{i} {{ leaf{i} }} }} }}",
                i = i
            );
            context.set_operations(RequestOperations::Single(parse_operation(&source)));

            tokio::time::sleep(std::time::Duration::from_millis((i % 7) as u64)).await;

            let finished = context.finish();
            (i, finished)
        }));
    }

    for handle in handles {
        let (i, finished) = handle.await.unwrap();
        assert_eq!(
            finished.name.as_deref(),
            Some(
                format!(
                    "WebTransaction/Expressjs/POST//query/Operation{i}/shelf{i}.books{i}.leaf{i}",
                    i = i
                )
                .as_str()
            )
        );
    }

    assert_eq!(listener.finished().len(), 64);
}
