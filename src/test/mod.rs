use crate::context::EvalContext;
use crate::section::MemorySection;

// Helper function to create deterministic, non-repeating byte data
pub fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

// Helper function to create a context with a single attached memory section
pub fn context_with_memory(data: Vec<u8>) -> EvalContext {
    let mut ctx = EvalContext::new();
    ctx.attach_section(Box::new(MemorySection::new("main", data)));
    ctx
}
