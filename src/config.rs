/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时回放的场景数量
    pub max_concurrent_scenarios: usize,
    /// 场景 TOML 文件存放目录
    pub scenario_folder: String,
    /// 判分报告输出目录
    pub report_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 计时器配置 ---
    /// 剩余时间预警阈值（秒）
    pub warning_threshold_secs: u64,
    /// 计时器滴答周期（毫秒），真实考试为1000
    pub timer_tick_millis: u64,
    // --- 会话配置 ---
    /// 默认作答语言代码
    pub default_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_scenarios: 4,
            scenario_folder: "scenarios".to_string(),
            report_folder: "reports".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warning_threshold_secs: 300,
            timer_tick_millis: 1000,
            default_language: "en".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_scenarios: std::env::var("MAX_CONCURRENT_SCENARIOS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_scenarios),
            scenario_folder: std::env::var("SCENARIO_FOLDER").unwrap_or(default.scenario_folder),
            report_folder: std::env::var("REPORT_FOLDER").unwrap_or(default.report_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warning_threshold_secs: std::env::var("WARNING_THRESHOLD_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.warning_threshold_secs),
            timer_tick_millis: std::env::var("TIMER_TICK_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.timer_tick_millis),
            default_language: std::env::var("DEFAULT_LANGUAGE").unwrap_or(default.default_language),
        }
    }
}
