use super::*;
use crate::event::EventScheduler;
use crate::layer::DEFAULT_EVENT;
use crate::test_support::{CountingInitializer, PulseAction, RecordingRenderer};
use crate::time::clock::{ManualClock, ManualTime};

fn pulse_layer(when: u64, duration: u64) -> Layer {
    let mut layer = Layer::new(Box::new(RecordingRenderer::default()));
    let mut e = EventScheduler::new();
    e.add_action(Box::new(PulseAction::new(when, duration)), when);
    layer.add_event(DEFAULT_EVENT, e);
    layer
}

fn manual() -> (Animation, ManualTime) {
    let clock = ManualClock::new();
    let time = clock.handle();
    (Animation::with_clock(Box::new(clock)), time)
}

#[test]
fn render_follows_the_clock_and_completes() {
    let (mut anim, time) = manual();
    anim.add_layers([pulse_layer(0, 100), pulse_layer(50, 100)]);

    anim.render().unwrap();
    assert_eq!(anim.elapsed(), 0);
    assert!(!anim.is_done());

    time.set(120);
    anim.render().unwrap();
    assert_eq!(anim.elapsed(), 120);
    assert_eq!(anim.last_frame_delta(), 120);
    assert!(!anim.is_done());
    assert!(anim.layers()[0].is_done());

    time.set(151);
    anim.render().unwrap();
    assert!(anim.is_done());
}

#[test]
fn layers_receive_the_frame_snapshot() {
    let (mut anim, time) = manual();
    anim.add_layer(pulse_layer(0, 1000));
    anim.set_scale_factor(2.5);
    time.set(40);
    anim.render().unwrap();

    let frame = anim.layers()[0].context().frame();
    assert_eq!(frame.elapsed_ms, 40);
    assert_eq!(frame.scale_factor, 2.5);
    assert_eq!(frame, anim.frame_info());
}

#[test]
fn empty_animation_is_done() {
    let anim = Animation::default();
    assert!(anim.is_done());
}

#[test]
fn prepare_to_finish_stops_looping_layers() {
    let (mut anim, time) = manual();
    anim.add_layer(pulse_layer(0, 10));
    anim.set_loop(true);
    time.set(500);
    anim.render().unwrap();
    assert!(!anim.is_done());

    anim.prepare_to_finish();
    time.set(501);
    anim.render().unwrap();
    assert!(anim.is_done());
}

#[test]
fn set_event_is_broadcast() {
    let (mut anim, _time) = manual();
    let mut with_outro = pulse_layer(0, 10);
    with_outro.add_event("outro", EventScheduler::new());
    anim.add_layers([with_outro, pulse_layer(0, 10)]);

    anim.set_event("outro");
    assert_eq!(anim.layers()[0].current_event_name(), Some("outro"));
    assert_eq!(anim.layers()[1].current_event_name(), None);
}

#[test]
fn reset_rewinds_clock_and_layers() {
    let (mut anim, time) = manual();
    let mut layer = pulse_layer(0, 10);
    let init = CountingInitializer::default();
    layer.add_initializer(Box::new(init.clone())).unwrap();
    anim.add_layer(layer);

    time.set(100);
    anim.render().unwrap();
    assert!(anim.is_done());

    anim.reset().unwrap();
    assert_eq!(anim.elapsed(), 0);
    assert_eq!(init.calls(), 2);
    assert!(!anim.is_done());

    anim.render().unwrap();
    assert_eq!(anim.elapsed(), 0);
}

#[test]
fn clone_keeps_running_actions_and_clock_phase() {
    let (mut anim, time) = manual();
    anim.add_layer(pulse_layer(0, 1000));
    time.set(300);
    anim.render().unwrap();

    let mut copy = anim.clone();
    assert_eq!(copy.elapsed(), 300);
    let running = |a: &Animation| a.layers()[0].current_event().map(|e| e.running().len());
    assert_eq!(running(&copy), Some(1));

    time.set(1001);
    copy.render().unwrap();
    assert!(copy.is_done());
    assert_eq!(anim.elapsed(), 300);
    assert!(!anim.is_done());
    assert!(copy.assets().ptr_eq(anim.assets()));
}

#[test]
fn animations_can_move_between_threads() {
    fn assert_send<T: Send>() {}
    assert_send::<Animation>();
}
