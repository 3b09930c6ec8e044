/// Resource usage reported in heartbeats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeLoad {
    pub cpu_usage: f32,
    pub mem_usage: f32,
}

/// Samples the local resource usage before each heartbeat.
pub trait LoadSampler: Send + Sync + 'static {
    fn sample(&self) -> NodeLoad;
}

/// Reports zero usage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NoLoadSampler;

impl LoadSampler for NoLoadSampler {
    fn sample(&self) -> NodeLoad {
        NodeLoad::default()
    }
}
