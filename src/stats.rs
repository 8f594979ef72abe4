use prometheus::{IntCounterVec, Opts, Registry};

pub struct BotStats {
    /// Command usage counters
    pub cmd: IntCounterVec,
    /// Finished paginator sessions by final state
    pub sessions: IntCounterVec,
    /// Button clicks by where they were routed
    pub buttons: IntCounterVec,
}

impl BotStats {
    pub fn new() -> prometheus::Result<Self> {
        let opts = Opts::new("commands", "specific commands usage");
        let cmd = IntCounterVec::new(opts, &["name"])?;

        let opts = Opts::new("sessions", "finished paginator sessions");
        let sessions = IntCounterVec::new(opts, &["state"])?;

        let opts = Opts::new("buttons", "paginator button clicks");
        let buttons = IntCounterVec::new(opts, &["route"])?;

        Ok(Self {
            cmd,
            sessions,
            buttons,
        })
    }
}

pub struct BotMetrics {
    pub registry: Registry,
    pub bot: BotStats,
}

impl BotMetrics {
    pub fn new(bot_metrics: BotStats) -> prometheus::Result<Self> {
        let registry =
            Registry::new_custom(Some(String::from("fumo_pager")), None)?;

        registry.register(Box::new(bot_metrics.cmd.clone()))?;
        registry.register(Box::new(bot_metrics.sessions.clone()))?;
        registry.register(Box::new(bot_metrics.buttons.clone()))?;

        Ok(Self {
            registry,
            bot: bot_metrics,
        })
    }
}
