//! In-process stand-in for [`SystemRunner`](crate::SystemRunner)
//!
//! Each program name is bound to a closure that produces its output (and may
//! touch the filesystem the way the real tool would). Every invocation is
//! recorded so tests can assert on the exact command lines.

use crate::{ToolInvocation, ToolOutput, ToolRunner};
use fondscan_core::{FondscanError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

type Handler = Box<dyn Fn(&ToolInvocation) -> Result<ToolOutput>>;

#[derive(Default)]
pub struct ScriptedRunner {
    handlers: HashMap<String, Handler>,
    calls: RefCell<Vec<ToolInvocation>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `program` to `handler`; programs without a handler are reported
    /// as not installed
    #[must_use]
    pub fn on<F>(mut self, program: &str, handler: F) -> Self
    where
        F: Fn(&ToolInvocation) -> Result<ToolOutput> + 'static,
    {
        self.handlers.insert(program.to_string(), Box::new(handler));
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn called(&self, program: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.program == program)
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        match self.handlers.get(&invocation.program) {
            Some(handler) => handler(invocation),
            None => Err(FondscanError::ToolNotFound {
                tool: invocation.program.clone(),
            }),
        }
    }
}
