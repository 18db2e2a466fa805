// bench_classify.rs
//
// benchmark the catalog and the whole pipeline of
// `gcslib::readers::gclogprocessor::GcLogProcessor`
//

extern crate gcslib;

use gcslib::data::eventkind::LineShape;
use gcslib::readers::classifier::classify_kind;
use gcslib::readers::gclogprocessor::{
    GcLogProcessor,
    GcLogProcessorConfig,
    IgnoreNotifications,
};

extern crate criterion;
use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// payload matched by the first catalog entry
const PAYLOAD_FIRST: &str = "GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms";
/// payload matched by the last catalog entry
const PAYLOAD_LAST: &str = "Heap Region Size: 1M";
/// payload matched by no catalog entry
const PAYLOAD_NONE: &str = "Something unexpected happened at the end of the run";

const LOG_G1_DETAILED: &str = "\
[0.004s][info][gc] Using G1
[0.005s][info][gc,init] Version: 17.0.2+8-86 (release)
[0.005s][info][gc,init] CPUs: 8 total, 8 available
[0.005s][info][gc,init] Memory: 15884M
[18.404s][info][gc,start    ] GC(5) Pause Young (Normal) (G1 Evacuation Pause)
[18.404s][info][gc,task     ] GC(5) Using 8 workers of 8 for evacuation
[18.405s][info][gc,phases   ] GC(5)   Pre Evacuate Collection Set: 0.1ms
[18.405s][info][gc,heap     ] GC(5) Eden regions: 24->0(22)
[18.406s][info][gc,metaspace] GC(5) Metaspace: 2900K(3072K)->2900K(3072K) NonClass: 2600K(2700K)->2600K(2700K) Class: 300K(372K)->300K(372K)
[18.406s][info][gc          ] GC(5) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms
[18.406s][info][gc,cpu      ] GC(5) User=0.01s Sys=0.00s Real=0.00s
[20.001s][info][gc          ] GC(6) Concurrent Cycle
[20.100s][info][gc          ] GC(6) Pause Remark 40M->40M(46M) 2.345ms
[20.300s][info][gc          ] GC(6) Concurrent Cycle 299.000ms
";

#[inline(never)]
fn classify_first() {
    black_box(classify_kind(black_box(PAYLOAD_FIRST), LineShape::Single));
}

#[inline(never)]
fn classify_last() {
    black_box(classify_kind(black_box(PAYLOAD_LAST), LineShape::Single));
}

#[inline(never)]
fn classify_none() {
    black_box(classify_kind(black_box(PAYLOAD_NONE), LineShape::Single));
}

#[inline(never)]
fn process_log(verify_catalog: bool) {
    let mut processor = GcLogProcessor::new(GcLogProcessorConfig {
        verify_catalog,
        ..Default::default()
    });
    let records = match processor.process_lines(LOG_G1_DETAILED.lines(), &mut IgnoreNotifications) {
        Ok(records) => records,
        Err(err) => panic!("process_lines failed {}", err),
    };

    black_box(records);
}

// criterion runners

fn criterion_benchmark(c: &mut Criterion) {
    let mut bg = c.benchmark_group("classify");
    bg.bench_function("classify_first", |b| b.iter(classify_first));
    bg.bench_function("classify_last", |b| b.iter(classify_last));
    bg.bench_function("classify_none", |b| b.iter(classify_none));
    bg.finish();

    let mut bg = c.benchmark_group("GcLogProcessor");
    bg.bench_function("process_log", |b| b.iter(|| process_log(false)));
    bg.bench_function("process_log_verify_catalog", |b| b.iter(|| process_log(true)));
    bg.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
