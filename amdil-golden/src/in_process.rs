//! Disassembler backend that calls `amdil-disasm` directly.

use std::path::Path;

use async_trait::async_trait;

use crate::backend::Disassembler;
use crate::GoldenError;

/// Runs the decoder in this process on a blocking worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessDisassembler;

#[async_trait]
impl Disassembler for InProcessDisassembler {
    async fn disassemble(&self, input: &Path, output: &Path) -> Result<(), GoldenError> {
        let input = input.to_owned();
        let output = output.to_owned();
        tokio::task::spawn_blocking(move || amdil_disasm::disassemble_file(&input, &output))
            .await??;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), GoldenError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "in-process".to_owned()
    }
}
