use roadquad::{IndexConfig, LatLon, SyncSegmentIndex};
use std::io::Cursor;
use std::thread;

#[test]
fn test_parallel_polyline_writers() {
    let index = SyncSegmentIndex::with_config(IndexConfig::default().with_leaf_threshold(8)).unwrap();

    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let index = index.clone();
            thread::spawn(move || {
                for edge in 0..20u32 {
                    let lat = 40.0 + worker as f64 + edge as f64 * 0.01;
                    let lon = -100.0 + edge as f64 * 0.02;
                    let points = [
                        LatLon::new(lat, lon),
                        LatLon::new(lat + 0.005, lon + 0.005),
                        LatLon::new(lat + 0.005, lon + 0.01),
                    ];
                    let ids = index.insert_polyline(worker * 1000 + edge, &points).unwrap();
                    assert_eq!(ids.len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(index.len(), 8 * 20 * 2);
    index.read(|idx| {
        // Each polyline's two segments got consecutive ids.
        for pair in idx.segments().as_slice().chunks(2) {
            assert_eq!(pair[0].edge_id, pair[1].edge_id);
            assert_eq!(pair[0].b, pair[1].a);
        }
        assert_eq!(idx.root().collect_segment_ids().len(), idx.len());
    });
}

#[test]
fn test_reader_and_loader() {
    let index = SyncSegmentIndex::new();
    let reader = index.clone();

    let summary = index
        .load_edge_geometry(Cursor::new("1^a^b^1^0.0^0.0^1.0^1.0^2.0^2.0\n"))
        .unwrap();
    assert_eq!(summary.segments, 2);

    let handle = thread::spawn(move || reader.stats());
    let stats = handle.join().unwrap();
    assert_eq!(stats.segments, 2);
    assert!(!index.is_empty());
}
