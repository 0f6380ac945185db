use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// 性能统计 Guard：记录 elapsed_ms 与嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = workshop_distribution::perf::PerfGuard::new("generate_distribution");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            depth,
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }
}

/// 当前线程内活跃的 PerfGuard 数
pub fn active_depth() -> u32 {
    PERF_DEPTH.with(|d| d.get())
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            depth = self.depth,
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
