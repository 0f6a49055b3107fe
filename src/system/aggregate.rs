use std::collections::HashMap;

use super::process::{AggregatedRow, ProcessSample, SYSTEM_GROUP, SYSTEM_PID_THRESHOLD};

/// Key a sample is grouped under: its own name, or `SYSTEM` for low PIDs.
pub fn grouping_name(sample: &ProcessSample) -> &str {
    if sample.pid < SYSTEM_PID_THRESHOLD {
        SYSTEM_GROUP
    } else {
        &sample.name
    }
}

/// Fold one tick's samples into rows keyed by grouping name.
///
/// Pure: the returned map is freshly allocated and nothing is carried over
/// between calls. Sums are arithmetic sums over the group, never averages.
pub fn aggregate<I>(samples: I) -> HashMap<String, AggregatedRow>
where
    I: IntoIterator<Item = ProcessSample>,
{
    let mut rows: HashMap<String, AggregatedRow> = HashMap::new();
    for sample in samples {
        let key = grouping_name(&sample).to_string();
        match rows.get_mut(&key) {
            Some(row) => row.fold(sample),
            None => {
                let row = AggregatedRow::seed(key.clone(), sample);
                rows.insert(key, row);
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, name: &str, cpu: f64, mem: f64, status: &str) -> ProcessSample {
        ProcessSample {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_percent: mem,
            status: status.to_string(),
        }
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn low_pid_is_reclassified() {
        let s = sample(500, "foo", 1.0, 1.0, "running");
        assert_eq!(grouping_name(&s), SYSTEM_GROUP);
        let rows = aggregate(vec![s]);
        assert!(rows.contains_key(SYSTEM_GROUP));
        assert!(!rows.contains_key("foo"));
    }

    #[test]
    fn pid_threshold_is_exclusive() {
        let at = sample(1000, "bar", 1.0, 1.0, "running");
        let below = sample(999, "bar", 1.0, 1.0, "running");
        assert_eq!(grouping_name(&at), "bar");
        assert_eq!(grouping_name(&below), SYSTEM_GROUP);
    }

    #[test]
    fn named_system_process_merges_with_low_pids() {
        let rows = aggregate(vec![
            sample(1, "init", 0.5, 0.1, "running"),
            sample(4000, "SYSTEM", 1.5, 0.2, "sleeping"),
        ]);
        assert_eq!(rows.len(), 1);
        let row = &rows[SYSTEM_GROUP];
        assert_eq!(row.member_count, 2);
        assert!((row.cpu_percent - 2.0).abs() < 1e-9);
    }

    #[test]
    fn canonical_scenario() {
        let rows = aggregate(vec![
            sample(1, "init", 0.5, 0.1, "running"),
            sample(2000, "chrome", 10.0, 5.0, "running"),
            sample(2001, "chrome", 15.0, 6.0, "sleeping"),
        ]);
        assert_eq!(rows.len(), 2);

        let system = &rows[SYSTEM_GROUP];
        assert_eq!(system.member_count, 1);
        assert_eq!(system.representative_pid, 1);
        assert!((system.cpu_percent - 0.5).abs() < 1e-9);
        assert!((system.memory_percent - 0.1).abs() < 1e-9);

        let chrome = &rows["chrome"];
        assert_eq!(chrome.member_count, 2);
        assert_eq!(chrome.representative_pid, 2000);
        assert!((chrome.cpu_percent - 25.0).abs() < 1e-9);
        assert!((chrome.memory_percent - 11.0).abs() < 1e-9);
        assert_eq!(chrome.status, "sleeping");
    }

    #[test]
    fn calls_are_independent() {
        let first = aggregate(vec![sample(2000, "chrome", 10.0, 5.0, "running")]);
        let second = aggregate(vec![sample(2000, "chrome", 10.0, 5.0, "running")]);
        assert_eq!(first, second);
        assert_eq!(second["chrome"].member_count, 1);
    }
}
