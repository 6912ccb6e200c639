//! Process-wide prometheus counters.

use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};
use std::sync::LazyLock;

pub static QUERIES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "pilot_queries_total",
        "Processed queries by outcome",
        &["outcome"]
    )
    .expect("pilot_queries_total registers once")
});

pub static TOOL_CALLS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "pilot_tool_calls_total",
        "Tool invocations dispatched from plans",
        &["tool"]
    )
    .expect("pilot_tool_calls_total registers once")
});

pub static TOOLS_SKIPPED: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter!(
        "pilot_tools_skipped_total",
        "Planned tool calls naming an unregistered tool"
    )
    .expect("pilot_tools_skipped_total registers once")
});

/// Default registry in the text exposition format.
pub fn render() -> Result<(Vec<u8>, String), prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok((buffer, encoder.format_type().to_string()))
}
