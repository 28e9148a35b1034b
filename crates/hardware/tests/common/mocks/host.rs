use std::collections::VecDeque;

use sbc6809_core::soc::devices::ConsoleHost;

/// Host console fed from a byte queue, capturing everything written.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl ScriptedHost {
    pub fn with_input(keys: &[u8]) -> Self {
        Self {
            input: keys.iter().copied().collect(),
            output: Vec::new(),
        }
    }
}

impl ConsoleHost for ScriptedHost {
    fn key_pending(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_key(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}
