mod common;

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use buzzer_tone::{
    config::GeneratorConfig,
    io::{LoopbackOpener, Signal, SinkTap},
    peripheral::{Buzzer, BuzzerConfig, BuzzerInputs},
    synth::{Generator, Launcher, ThreadBudget},
};
use common::{wait_until, Drain};

fn inputs(freq: u32, enable: bool, vol: u32) -> BuzzerInputs {
    BuzzerInputs {
        freq: Signal::Defined(freq),
        enable: Signal::from(enable),
        vol: Signal::Defined(vol),
    }
}

/// Pop samples from `tap` until `count` arrive or the deadline passes
fn collect(tap: &mut SinkTap, count: usize) -> Vec<i8> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut out = Vec::with_capacity(count);
    while out.len() < count && Instant::now() < deadline {
        if tap.read_available(&mut out) == 0 {
            thread::sleep(Duration::from_millis(1));
        }
    }
    out.truncate(count);
    out
}

fn next_tap(taps: &Receiver<SinkTap>) -> SinkTap {
    taps.recv_timeout(Duration::from_secs(5))
        .expect("worker never opened its sink")
}

#[test]
fn renders_523_hz_at_full_volume_then_closes_on_disable() {
    let (opener, taps) = LoopbackOpener::new();
    let launcher = Launcher::new(opener).with_budget(ThreadBudget::new(4));
    let mut buzzer = Buzzer::new(BuzzerConfig::new().volume_width(7));

    buzzer.propagate(&inputs(523, true, 127), &launcher);
    assert!(buzzer.is_sounding());

    let mut tap = next_tap(&taps);
    let samples = collect(&mut tap, 8_000);
    assert_eq!(samples.len(), 8_000);

    assert_eq!(samples.iter().copied().max(), Some(127));
    assert_eq!(samples.iter().copied().min(), Some(-127));

    // rising zero crossings are one cycle apart
    let rising: Vec<usize> = samples
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] <= 0 && w[1] > 0)
        .map(|(i, _)| i)
        .collect();
    assert!(rising.len() > 40, "only {} cycles", rising.len());
    let span = rising[rising.len() - 1] - rising[0];
    let period = span as f64 / (rising.len() - 1) as f64;
    let hz = 80_000.0 / period;
    assert!((hz - 523.0).abs() < 4.0, "measured {hz:.1} Hz");

    // ENABLE low: the worker leaves its loop and closes the sink
    buzzer.propagate(&inputs(523, false, 127), &launcher);
    let mut scratch = Vec::new();
    let closed = wait_until(|| {
        tap.read_available(&mut scratch);
        tap.is_closed()
    });
    assert!(closed, "sink still open after disable");
    assert!(wait_until(|| !buzzer.is_sounding()));
}

#[test]
fn silent_controls_write_nothing_but_keep_worker_alive() {
    let (opener, taps) = LoopbackOpener::new();
    let launcher = Launcher::new(opener).with_budget(ThreadBudget::new(4));
    let mut buzzer = Buzzer::default();

    buzzer.propagate(&inputs(0, true, 127), &launcher);
    let mut tap = next_tap(&taps);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(tap.pop(), None);
    assert!(buzzer.is_sounding());

    // frequency arrives on a later step; sound starts without a new thread
    buzzer.propagate(&inputs(440, true, 127), &launcher);
    assert!(!collect(&mut tap, 100).is_empty());
    assert_eq!(launcher.budget().live(), 1);

    buzzer.stop();
    let mut scratch = Vec::new();
    assert!(wait_until(|| {
        tap.read_available(&mut scratch);
        tap.is_closed()
    }));
}

#[test]
fn disabled_generators_leave_no_threads_behind() {
    let (opener, taps) = LoopbackOpener::new();
    let drain = Drain::spawn(taps);
    let budget = ThreadBudget::new(16);
    let launcher = Launcher::new(opener).with_budget(budget.clone());

    let mut buzzers: Vec<Buzzer> = (0..8).map(|_| Buzzer::default()).collect();
    for (i, buzzer) in buzzers.iter_mut().enumerate() {
        buzzer.propagate(&inputs(200 + 50 * i as u32, true, 100), &launcher);
    }
    assert!(wait_until(|| drain.open_sinks() == 8));
    assert!(wait_until(|| drain.samples() > 0));

    for buzzer in &mut buzzers {
        buzzer.propagate(&inputs(0, false, 0), &launcher);
    }
    assert!(wait_until(|| buzzers.iter().all(|b| !b.is_sounding())));
    assert!(wait_until(|| budget.live() == 0));
    assert!(wait_until(|| drain.open_sinks() == 0));
}

#[test]
fn re_enable_after_stop_spawns_new_worker() {
    let (opener, taps) = LoopbackOpener::new();
    let drain = Drain::spawn(taps);
    let launcher = Launcher::new(opener).with_budget(ThreadBudget::new(4));
    let mut buzzer = Buzzer::default();

    buzzer.propagate(&inputs(523, true, 50), &launcher);
    buzzer.propagate(&inputs(523, false, 50), &launcher);
    assert!(wait_until(|| !buzzer.is_sounding()));

    buzzer.propagate(&inputs(523, true, 50), &launcher);
    assert!(buzzer.is_sounding());
    // repeated enabled steps do not pile up threads
    for _ in 0..10 {
        buzzer.propagate(&inputs(523, true, 50), &launcher);
    }
    assert_eq!(launcher.budget().live(), 1);

    buzzer.stop();
    assert!(wait_until(|| !buzzer.is_sounding()));
    drop(drain);
}

#[test]
fn re_enable_while_draining_keeps_the_same_worker_playing() {
    let (opener, taps) = LoopbackOpener::new();
    let budget = ThreadBudget::new(4);
    let launcher = Launcher::new(opener)
        .with_budget(budget.clone())
        .with_config(GeneratorConfig::new().buffer_len(800));
    let mut buzzer = Buzzer::default();

    // nobody reads yet, so the ring fills and the worker blocks on write
    buzzer.propagate(&inputs(523, true, 127), &launcher);
    let mut tap = next_tap(&taps);
    thread::sleep(Duration::from_millis(20));

    // ENABLE low, then free one slot so the blocked write completes and the
    // worker leaves its loop with a full ring to drain
    buzzer.propagate(&inputs(523, false, 127), &launcher);
    assert!(tap.pop().is_some());
    thread::sleep(Duration::from_millis(10));

    // still draining: the step sees a live worker and spawns nothing
    buzzer.propagate(&inputs(523, true, 127), &launcher);
    assert!(buzzer.is_sounding());
    assert_eq!(budget.live(), 1);

    let mut samples = Vec::new();
    let until = Instant::now() + Duration::from_millis(300);
    while Instant::now() < until {
        tap.read_available(&mut samples);
        thread::sleep(Duration::from_millis(1));
    }

    assert!(buzzer.is_sounding(), "ENABLE is high but no worker is running");
    assert!(!tap.is_closed());
    assert_eq!(budget.live(), 1);
    // 300ms at 80kHz is 24000 samples; the drained ring alone holds 800
    assert!(samples.len() > 8_000, "only {} samples", samples.len());
    assert!(taps.try_recv().is_err(), "no second sink was opened");

    buzzer.stop();
    let mut scratch = Vec::new();
    assert!(wait_until(|| {
        tap.read_available(&mut scratch);
        tap.is_closed()
    }));
    assert!(wait_until(|| budget.live() == 0));
}

#[test]
fn thread_cap_silently_declines_extra_generators() {
    let (opener, taps) = LoopbackOpener::new();
    let budget = ThreadBudget::new(100);
    let launcher = Launcher::new(opener)
        .with_budget(budget.clone())
        .with_config(GeneratorConfig::new().buffer_len(64));

    let mut generators: Vec<Generator> = (0..100)
        .map(|_| {
            let generator = Generator::new();
            generator.set_enabled(true);
            generator
        })
        .collect();
    for generator in &mut generators {
        assert!(launcher.start(generator));
    }
    assert_eq!(budget.live(), 100);

    let mut extra = Generator::new();
    extra.set_enabled(true);
    assert!(!launcher.start(&mut extra), "101st worker must not start");
    assert!(!extra.is_running());
    assert_eq!(budget.live(), 100);

    // Nobody consumed the rings, so workers sit blocked on full sinks.
    // Stopping plus dropping the taps lets every one of them exit.
    for generator in &generators {
        generator.stop();
    }
    let held: Vec<SinkTap> = taps.try_iter().collect();
    drop(held);
    drop(taps);
    assert!(wait_until(|| budget.live() == 0));
    assert!(generators.iter().all(|g| !g.is_running()));

    // capacity is back; with the tap receiver gone the worker fails to open
    // its sink and exits on its own
    assert!(launcher.start(&mut extra));
    assert!(wait_until(|| !extra.is_running()));
    assert!(wait_until(|| budget.live() == 0));
}
