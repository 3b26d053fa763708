use super::*;

#[test]
fn empty_samples_have_no_summary() {
    assert_eq!(FrameTimings::from_durations(&[]), None);
}

#[test]
fn summary_uses_sorted_positions() {
    let samples: Vec<Duration> = (1..=100).rev().map(Duration::from_millis).collect();
    let t = FrameTimings::from_durations(&samples).unwrap();
    assert_eq!(t.frames, 100);
    assert_eq!(t.fastest_ms, 1.0);
    assert_eq!(t.slowest_ms, 100.0);
    assert!((t.average_ms - 50.5).abs() < 1e-9);
    assert_eq!(t.median_ms, 51.0);
    assert_eq!(t.p99_ms, 100.0);
    assert!(t.to_string().contains("99%: 100.000ms"));
}

#[test]
fn merge_adds_every_counter() {
    let mut a = FrameStats {
        fragments_emitted: 3,
        triangles_culled: 1,
        ..FrameStats::default()
    };
    a.merge(&FrameStats {
        fragments_emitted: 2,
        fragments_written: 4,
        ..FrameStats::default()
    });
    assert_eq!(a.fragments_emitted, 5);
    assert_eq!(a.fragments_written, 4);
    assert_eq!(a.triangles_culled, 1);
}
