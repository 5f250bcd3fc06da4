//! QIWI payment handler.

use super::PAYMENT_FIELD;
use crate::handler::Handler;
use std::ops::ControlFlow;
use tollgate_core::{Diagnostic, Request, RunContext};

/// Step name.
pub const NAME: &str = "qiwi";

/// Payment method value this handler accepts, and the processor name it reports.
pub const PROCESSOR: &str = "QIWI";

/// Processes payments made through QIWI.
#[derive(Debug, Clone, Copy, Default)]
pub struct QiwiHandler;

impl QiwiHandler {
    /// Creates the handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Handler for QiwiHandler {
    fn name(&self) -> &'static str {
        NAME
    }

    fn matches(&self, request: &Request) -> bool {
        request.field_equals(PAYMENT_FIELD, PROCESSOR)
    }

    fn act(&self, ctx: &mut RunContext, _request: &Request) -> ControlFlow<()> {
        ctx.emit(Diagnostic::Processed {
            processor: PROCESSOR,
        });
        ControlFlow::Break(())
    }
}
