use beacon::{LoadSampler, NodeLoad};
use std::fs;
use std::thread;

const LOADAVG_PATH: &str = "/proc/loadavg";
const MEMINFO_PATH: &str = "/proc/meminfo";

/// Samples the host load from procfs. Reports zeros where procfs is unavailable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ProcLoadSampler;

impl ProcLoadSampler {
    pub fn new() -> ProcLoadSampler {
        ProcLoadSampler
    }
}

impl LoadSampler for ProcLoadSampler {
    fn sample(&self) -> NodeLoad {
        let cpus = thread::available_parallelism()
            .map(|cpus| cpus.get())
            .unwrap_or(1);

        let cpu_usage = fs::read_to_string(LOADAVG_PATH)
            .ok()
            .and_then(|loadavg| cpu_usage(&loadavg, cpus))
            .unwrap_or_default();

        let mem_usage = fs::read_to_string(MEMINFO_PATH)
            .ok()
            .and_then(|meminfo| mem_usage(&meminfo))
            .unwrap_or_default();

        trace!("Load sampled: cpu {:.2} mem {:.2}", cpu_usage, mem_usage);

        NodeLoad {
            cpu_usage,
            mem_usage,
        }
    }
}

/// One-minute load average per CPU.
fn cpu_usage(loadavg: &str, cpus: usize) -> Option<f32> {
    let load: f32 = loadavg.split_whitespace().next()?.parse().ok()?;

    Some(load / cpus.max(1) as f32)
}

/// Share of memory in use, from 0 to 1.
fn mem_usage(meminfo: &str) -> Option<f32> {
    let field = |name: &str| -> Option<f32> {
        meminfo
            .lines()
            .find(|line| line.starts_with(name))?
            .split_whitespace()
            .nth(1)?
            .parse()
            .ok()
    };

    let total = field("MemTotal:")?;
    let available = field("MemAvailable:")?;
    if total <= 0.0 {
        return None;
    }

    Some(1.0 - available / total)
}
