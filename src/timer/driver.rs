//! 计时器驱动
//!
//! 用 tokio 的 interval 按真实时钟驱动 `CountdownTimer`，
//! 事件经 channel 发给宿主（UI 或会话流程），命令 channel 支持
//! 暂停/恢复/停止。宿主关闭任意一端即停止计时，不会触发交卷。

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::debug;

use crate::timer::countdown::{CountdownTimer, TimerEvent};

/// 计时器控制命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Pause,
    Resume,
    Stop,
}

/// 计时器句柄：事件接收端 + 命令发送端 + 后台任务
pub struct TimerHandle {
    pub events: mpsc::Receiver<TimerEvent>,
    pub commands: mpsc::Sender<TimerCommand>,
    pub task: JoinHandle<()>,
}

/// 启动倒计时后台任务
///
/// # 参数
/// - `timer`: 倒计时状态机
/// - `tick_period`: 滴答周期，真实考试为1秒（测试时可缩短）
pub fn spawn_countdown(timer: CountdownTimer, tick_period: Duration) -> TimerHandle {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (command_tx, command_rx) = mpsc::channel(8);

    let task = tokio::spawn(run_countdown(timer, tick_period, event_tx, command_rx));

    TimerHandle {
        events: event_rx,
        commands: command_tx,
        task,
    }
}

/// 倒计时主循环
///
/// 退出条件：时间耗尽、收到 Stop、或宿主关闭了事件/命令通道。
async fn run_countdown(
    mut timer: CountdownTimer,
    tick_period: Duration,
    events: mpsc::Sender<TimerEvent>,
    mut commands: mpsc::Receiver<TimerCommand>,
) {
    // 第一次滴答发生在一个周期之后，而不是立刻
    let mut ticker = interval_at(Instant::now() + tick_period, tick_period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in timer.tick() {
                    if events.send(event).await.is_err() {
                        debug!("事件通道已关闭，计时器停止");
                        return;
                    }
                }
                if timer.is_finished() {
                    debug!("⏰ 倒计时结束");
                    return;
                }
            }
            command = commands.recv() => {
                match command {
                    Some(TimerCommand::Pause) => {
                        timer.pause();
                        debug!("⏸️ 计时暂停 (剩余 {})", timer.format_remaining());
                    }
                    Some(TimerCommand::Resume) => {
                        timer.resume();
                        debug!("▶️ 计时恢复 (剩余 {})", timer.format_remaining());
                    }
                    Some(TimerCommand::Stop) | None => {
                        debug!("计时器已停止 (剩余 {})", timer.format_remaining());
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10毫秒一个滴答，3秒钟的考试在30毫秒内跑完
    #[tokio::test]
    async fn test_driver_emits_events_until_time_up() {
        let timer = CountdownTimer::new(3, Some(2)).unwrap();
        let mut handle = spawn_countdown(timer, Duration::from_millis(10));

        let mut warnings = 0;
        let mut time_ups = 0;

        while let Some(event) = handle.events.recv().await {
            match event {
                TimerEvent::Warning { remaining } => {
                    warnings += 1;
                    assert_eq!(remaining, 2);
                }
                TimerEvent::TimeUp => time_ups += 1,
                TimerEvent::Tick { .. } => {}
            }
        }

        assert_eq!(warnings, 1);
        assert_eq!(time_ups, 1);
        handle.task.await.unwrap();
    }

    #[tokio::test]
    async fn test_driver_stop_command_ends_without_time_up() {
        let timer = CountdownTimer::new(1000, None).unwrap();
        let mut handle = spawn_countdown(timer, Duration::from_millis(10));

        // 收到第一个滴答后立即停止
        let first = handle.events.recv().await.unwrap();
        assert!(matches!(first, TimerEvent::Tick { .. }));
        handle.commands.send(TimerCommand::Stop).await.unwrap();
        handle.task.await.unwrap();

        // 停止后不再有到时事件
        while let Some(event) = handle.events.recv().await {
            assert!(!matches!(event, TimerEvent::TimeUp));
        }
    }

    #[tokio::test]
    async fn test_driver_pause_suppresses_ticks() {
        let timer = CountdownTimer::new(1000, None).unwrap();
        let mut handle = spawn_countdown(timer, Duration::from_millis(10));

        handle.commands.send(TimerCommand::Pause).await.unwrap();
        // 留出若干周期，暂停期间不应有新事件（允许暂停前已入队的滴答）
        tokio::time::sleep(Duration::from_millis(50)).await;

        let drained = {
            let mut count = 0;
            while handle.events.try_recv().is_ok() {
                count += 1;
            }
            count
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(
            handle.events.try_recv().is_err(),
            "暂停后不应再产生滴答事件 (暂停前残留 {} 条)",
            drained
        );

        handle.commands.send(TimerCommand::Stop).await.unwrap();
        handle.task.await.unwrap();
    }
}
