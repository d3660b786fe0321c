use std::{fmt, sync::Arc};

use tevm_common::{Address, Bytes, U256};

/// One interpreter step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    pub pc: usize,
    pub opcode: u8,
    pub gas_left: u64,
    pub depth: usize,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContractEvent {
    pub address: Address,
    pub code: Bytes,
}

/// A message (call or create) about to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub caller: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResultEvent {
    pub gas_used: u64,
    pub return_data: Bytes,
    pub error: Option<String>,
}

pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Optional hooks the backend invokes while executing a call. The backend
/// decides when they fire; this layer only forwards them.
#[derive(Clone, Default)]
pub struct CallEvents {
    pub on_step: Option<Handler<StepEvent>>,
    pub on_new_contract: Option<Handler<NewContractEvent>>,
    pub on_before_message: Option<Handler<MessageEvent>>,
    pub on_after_message: Option<Handler<MessageResultEvent>>,
}

impl CallEvents {
    pub fn with_on_step(mut self, handler: impl Fn(&StepEvent) + Send + Sync + 'static) -> Self {
        self.on_step = Some(Arc::new(handler));
        self
    }

    pub fn with_on_new_contract(
        mut self,
        handler: impl Fn(&NewContractEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_new_contract = Some(Arc::new(handler));
        self
    }

    pub fn with_on_before_message(
        mut self,
        handler: impl Fn(&MessageEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_before_message = Some(Arc::new(handler));
        self
    }

    pub fn with_on_after_message(
        mut self,
        handler: impl Fn(&MessageResultEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_after_message = Some(Arc::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_step.is_none()
            && self.on_new_contract.is_none()
            && self.on_before_message.is_none()
            && self.on_after_message.is_none()
    }

    pub fn emit_step(&self, event: &StepEvent) {
        if let Some(handler) = &self.on_step {
            handler(event);
        }
    }

    pub fn emit_new_contract(&self, event: &NewContractEvent) {
        if let Some(handler) = &self.on_new_contract {
            handler(event);
        }
    }

    pub fn emit_before_message(&self, event: &MessageEvent) {
        if let Some(handler) = &self.on_before_message {
            handler(event);
        }
    }

    pub fn emit_after_message(&self, event: &MessageResultEvent) {
        if let Some(handler) = &self.on_after_message {
            handler(event);
        }
    }
}

impl fmt::Debug for CallEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallEvents")
            .field("on_step", &self.on_step.is_some())
            .field("on_new_contract", &self.on_new_contract.is_some())
            .field("on_before_message", &self.on_before_message.is_some())
            .field("on_after_message", &self.on_after_message.is_some())
            .finish()
    }
}
