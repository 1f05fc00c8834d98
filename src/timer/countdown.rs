//! 倒计时状态机
//!
//! 纯状态实现：每调用一次 `tick()` 代表流逝一秒，返回本秒产生的事件。
//! 预警事件和到时事件都只发出一次；到时后计时器停止，后续 tick 无效。
//! 暂停只冻结剩余时间，不重置。
//!
//! 真实时钟驱动见 `driver` 模块；场景回放直接调用 `advance` 推进。

use crate::error::{AppResult, TimerError};

/// 计时器事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 常规滴答，携带剩余秒数
    Tick { remaining: u64 },
    /// 剩余时间到达预警阈值（只发一次）
    Warning { remaining: u64 },
    /// 时间耗尽（只发一次）
    TimeUp,
}

/// 倒计时器
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    total_seconds: u64,
    remaining: u64,
    warning_at: Option<u64>,
    warning_fired: bool,
    time_up_fired: bool,
    paused: bool,
}

impl CountdownTimer {
    /// 创建倒计时器
    ///
    /// # 参数
    /// - `total_seconds`: 总时长（秒），必须大于0
    /// - `warning_at`: 剩余秒数预警阈值，必须小于总时长；None 表示不预警
    pub fn new(total_seconds: u64, warning_at: Option<u64>) -> AppResult<Self> {
        if total_seconds == 0 {
            return Err(TimerError::ZeroDuration.into());
        }
        if let Some(warning) = warning_at {
            if warning >= total_seconds {
                return Err(TimerError::WarningBeyondDuration {
                    warning_at: warning,
                    total_seconds,
                }
                .into());
            }
        }

        Ok(Self {
            total_seconds,
            remaining: total_seconds,
            warning_at,
            warning_fired: false,
            time_up_fired: false,
            paused: false,
        })
    }

    /// 流逝一秒，返回本秒产生的事件（暂停或已到时则为空）
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if self.paused || self.time_up_fired {
            return Vec::new();
        }

        self.remaining = self.remaining.saturating_sub(1);

        let mut events = vec![TimerEvent::Tick {
            remaining: self.remaining,
        }];

        if let Some(warning) = self.warning_at {
            if self.remaining == warning && !self.warning_fired {
                self.warning_fired = true;
                events.push(TimerEvent::Warning {
                    remaining: self.remaining,
                });
            }
        }

        if self.remaining == 0 {
            self.time_up_fired = true;
            events.push(TimerEvent::TimeUp);
        }

        events
    }

    /// 连续流逝若干秒（场景回放用）
    pub fn advance(&mut self, seconds: u64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..seconds {
            let batch = self.tick();
            if batch.is_empty() {
                break;
            }
            events.extend(batch);
        }
        events
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// 时间是否已耗尽
    pub fn is_finished(&self) -> bool {
        self.time_up_fired
    }

    /// 剩余时间的 HH:MM:SS 显示
    pub fn format_remaining(&self) -> String {
        let h = self.remaining / 3600;
        let m = (self.remaining % 3600) / 60;
        let s = self.remaining % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}
