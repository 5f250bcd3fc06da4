//! Dispatch chain integration tests.
//!
//! Counting handlers record how often their predicate and action are
//! invoked, which makes first-match-wins observable.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tollgate_core::{Diagnostic, Request, RunContext};
use tollgate_dispatch::{
    handlers::{QiwiHandler, SberbankHandler},
    Dispatch, DispatchChain, Handler,
};

#[derive(Default)]
struct Calls {
    matches: AtomicUsize,
    act: AtomicUsize,
}

/// A handler with a fixed verdict that counts its invocations.
struct CountingHandler {
    name: &'static str,
    matches: bool,
    calls: Arc<Calls>,
}

impl CountingHandler {
    fn new(name: &'static str, matches: bool) -> (Self, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        (
            Self {
                name,
                matches,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Handler for CountingHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, _request: &Request) -> bool {
        self.calls.matches.fetch_add(1, Ordering::SeqCst);
        self.matches
    }

    fn act(&self, ctx: &mut RunContext, _request: &Request) -> ControlFlow<()> {
        self.calls.act.fetch_add(1, Ordering::SeqCst);
        ctx.emit(Diagnostic::Processed {
            processor: self.name,
        });
        ControlFlow::Break(())
    }
}

fn payment_chain() -> DispatchChain {
    DispatchChain::builder()
        .add(QiwiHandler::new())
        .add(SberbankHandler::new())
        .build()
}

#[test]
fn test_qiwi_request_fires_qiwi() {
    let mut ctx = RunContext::new();

    let dispatch = payment_chain().run(&mut ctx, &Request::sample());

    assert_eq!(dispatch, Dispatch::Handled { handler: "qiwi" });
    assert_eq!(ctx.diagnostics(), &[Diagnostic::Processed { processor: "QIWI" }]);
}

#[test]
fn test_sberbank_request_falls_through_to_second_step() {
    let mut ctx = RunContext::new();
    let request = Request::sample().with_field("payment", "Sberbank");

    let dispatch = payment_chain().run(&mut ctx, &request);

    assert_eq!(dispatch, Dispatch::Handled { handler: "sberbank" });
    assert_eq!(
        ctx.diagnostics(),
        &[Diagnostic::Processed { processor: "Sberbank" }]
    );
}

#[test]
fn test_unknown_payment_exhausts_without_side_effects() {
    let mut ctx = RunContext::new();
    let request = Request::sample().with_field("payment", "Unknown");

    assert_eq!(payment_chain().run(&mut ctx, &request), Dispatch::Exhausted);
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_first_match_wins() {
    let (x, x_calls) = CountingHandler::new("x", true);
    let (y, y_calls) = CountingHandler::new("y", true);
    let chain = DispatchChain::builder().add(x).add(y).build();
    let mut ctx = RunContext::new();

    assert_eq!(
        chain.run(&mut ctx, &Request::new()),
        Dispatch::Handled { handler: "x" }
    );
    assert_eq!(x_calls.matches.load(Ordering::SeqCst), 1);
    assert_eq!(x_calls.act.load(Ordering::SeqCst), 1);
    assert_eq!(y_calls.matches.load(Ordering::SeqCst), 0);
    assert_eq!(y_calls.act.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_match_consults_every_predicate_once() {
    let (x, x_calls) = CountingHandler::new("x", false);
    let (y, y_calls) = CountingHandler::new("y", false);
    let chain = DispatchChain::builder().add(x).add(y).build();
    let mut ctx = RunContext::new();

    assert_eq!(chain.run(&mut ctx, &Request::new()), Dispatch::Exhausted);
    assert_eq!(x_calls.matches.load(Ordering::SeqCst), 1);
    assert_eq!(y_calls.matches.load(Ordering::SeqCst), 1);
    assert_eq!(x_calls.act.load(Ordering::SeqCst), 0);
    assert_eq!(y_calls.act.load(Ordering::SeqCst), 0);
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_overlapping_duplicate_handler_is_unreachable() {
    let chain = DispatchChain::builder()
        .add(QiwiHandler::new())
        .add(QiwiHandler::new())
        .build();
    let mut ctx = RunContext::new();

    chain.run(&mut ctx, &Request::sample());
    assert_eq!(ctx.diagnostics().len(), 1);
}
