use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use taskmancer::engine::Engine;
use taskmancer::system::aggregate::aggregate;
use taskmancer::system::collector::{HostCollector, ProcessCollector, ProcessSampler, SystemSampler};
use taskmancer::system::process::{SYSTEM_GROUP, SYSTEM_PID_THRESHOLD};
use taskmancer::system::snapshot::TickEvent;

fn spawn_long_lived_child() -> Child {
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("powershell");
        c.args([
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            "Start-Sleep -Seconds 30",
        ]);
        c
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut c = Command::new("sh");
        c.args(["-c", "sleep 30"]);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn child process")
}

#[test]
fn process_sample_includes_current_process() {
    let mut sampler = ProcessCollector::new();
    let samples = sampler.sample().expect("process table unavailable");
    let me = std::process::id();

    let own = samples
        .iter()
        .find(|s| s.pid == me)
        .expect("current process missing from sample");
    assert!(!own.name.is_empty());
    assert!(own.memory_percent > 0.0 && own.memory_percent <= 100.0);
    assert!(own.cpu_percent >= 0.0);
    assert!(!own.status.is_empty());
}

#[test]
fn spawned_child_lands_in_its_group() {
    let mut child = spawn_long_lived_child();
    let pid = child.id();

    let mut sampler = ProcessCollector::new();
    thread::sleep(Duration::from_millis(100));
    let samples = sampler.sample();
    let _ = child.kill();
    let _ = child.wait();

    let samples = samples.expect("process table unavailable");
    let sample = samples
        .iter()
        .find(|s| s.pid == pid)
        .cloned()
        .expect("child process not observed");

    let rows = aggregate(samples);
    let key = if pid < SYSTEM_PID_THRESHOLD {
        SYSTEM_GROUP
    } else {
        sample.name.as_str()
    };
    assert!(rows.get(key).is_some_and(|row| row.member_count >= 1));
}

#[test]
fn host_reading_is_a_percentage() {
    let mut sampler = HostCollector::new();
    let reading = sampler.sample().expect("host readings unavailable");
    assert!((0.0..=100.0).contains(&reading.memory_percent));
    assert!(reading.memory_percent > 0.0);
    assert!((0.0..=100.0).contains(&reading.cpu_percent));
}

#[test]
fn host_warmup_counts_down_from_priming() {
    let sampler = HostCollector::new();
    assert!(sampler.warmup() <= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    assert_eq!(sampler.warmup(), Duration::ZERO);
}

#[test]
fn engine_ticks_against_the_live_host() {
    let mut engine = Engine::new(ProcessCollector::new(), HostCollector::new(), 5).unwrap();
    for expected in 0..3u64 {
        match engine.tick() {
            TickEvent::Sample(report) => {
                assert_eq!(report.tick_index, expected);
                assert!(!report.rows.is_empty());
            }
            TickEvent::Error(err) => panic!("live tick failed: {}", err.reason),
        }
    }
    assert_eq!(engine.cpu_series().len(), 3);
}
