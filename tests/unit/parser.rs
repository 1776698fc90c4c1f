use super::*;
use crate::foundation::error::{JaoError, LookupKind};
use crate::layer::DEFAULT_EVENT;
use crate::render::{NullRenderer, Renderer};
use crate::test_support::{PulseAction, RecordingRenderer};

const PACKAGE: &str = r#"{
  "layers": [
    {
      "dataType": { "type": "text", "attributes": { "font": "mono" } },
      "events": [
        { "name": "Initialize", "actions": [
          { "library": "jao.std", "name": "Set", "attributes": { "x": "1", "label": "hi" } }
        ] },
        { "name": "default", "actions": [
          { "library": "test", "name": "Pulse", "when": "seconds 1", "attributes": { "duration": "500" } },
          { "library": "test", "name": "Pulse", "attributes": { "duration": "100" } }
        ] },
        { "name": "outro", "actions": [] }
      ]
    },
    {
      "dataType": { "type": "image" },
      "events": [ { "name": "idle", "actions": [] } ]
    }
  ]
}"#;

fn registry() -> ActionRegistry {
    let mut r = ActionRegistry::with_std();
    r.register_action_type::<PulseAction>("test", "Pulse");
    r
}

fn recording() -> impl RendererFactory {
    || -> JaoResult<Box<dyn Renderer>> { Ok(Box::new(RecordingRenderer::default())) }
}

#[test]
fn layers_keep_document_order_and_data_types() {
    let anim = parse_package(PACKAGE, &registry(), &recording(), None).unwrap();
    let layers = anim.layers();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].data_type().kind, "text");
    assert_eq!(layers[1].data_type().kind, "image");
    assert!(format!("{:?}", layers[0].renderer()).contains("mono"));
}

#[test]
fn initialize_event_runs_once_and_is_not_schedulable() {
    let anim = parse_package(PACKAGE, &registry(), &recording(), None).unwrap();
    let layer = &anim.layers()[0];
    assert_eq!(layer.parameters().get_as_long("x"), 1);
    assert_eq!(layer.parameters().get_as_string("label"), "hi");
    assert_eq!(layer.event_names(), vec!["default", "outro"]);
    assert!(!layer.has_event("Initialize"));
}

#[test]
fn events_are_built_with_parsed_offsets() {
    let anim = parse_package(PACKAGE, &registry(), &recording(), None).unwrap();
    let layer = &anim.layers()[0];
    assert_eq!(layer.current_event_name(), Some(DEFAULT_EVENT));

    let offsets: Vec<u64> = layer
        .event(DEFAULT_EVENT)
        .unwrap()
        .all_actions()
        .iter()
        .map(|a| a.when().as_millis())
        .collect();
    assert_eq!(offsets, vec![1000, 0]);
    assert_eq!(anim.layers()[1].current_event_name(), None);
}

#[test]
fn unknown_library_fails_the_whole_package() {
    let json = r#"{ "layers": [ { "events": [ { "name": "default", "actions": [
        { "library": "ghost", "name": "Boo" } ] } ] } ] }"#;
    let err = parse_package(json, &registry(), &NullRenderer::factory(), None).unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupKind::Library));
}

#[test]
fn unknown_initializer_is_reported() {
    let json = r#"{ "layers": [ { "events": [ { "name": "initialize", "actions": [
        { "library": "test", "name": "Pulse" } ] } ] } ] }"#;
    let err = parse_package(json, &registry(), &NullRenderer::factory(), None).unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupKind::Library));

    let json = r#"{ "layers": [ { "events": [ { "name": "initialize", "actions": [
        { "library": "jao.std", "name": "Tween" } ] } ] } ] }"#;
    let err = parse_package(json, &registry(), &NullRenderer::factory(), None).unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupKind::Initializer));
}

#[test]
fn malformed_json_and_bad_time_expressions_are_rejected() {
    let err = parse_package("{ nope", &registry(), &NullRenderer::factory(), None).unwrap_err();
    assert!(matches!(err, JaoError::Serde(_)));

    let json = r#"{ "layers": [ { "events": [ { "name": "default", "actions": [
        { "library": "test", "name": "Pulse", "when": "seconds soon" } ] } ] } ] }"#;
    let err = parse_package(json, &registry(), &NullRenderer::factory(), None).unwrap_err();
    assert!(matches!(err, JaoError::TimeExpression(_)));
}

#[test]
fn renderer_factory_errors_propagate() {
    let failing = || -> JaoResult<Box<dyn Renderer>> { Err(JaoError::renderer("no surface")) };
    let err = parse_package(PACKAGE, &registry(), &failing, None).unwrap_err();
    assert!(matches!(err, JaoError::Renderer(_)));
}

#[test]
fn parsed_animation_plays_to_completion() {
    let mut anim = parse_package(PACKAGE, &registry(), &recording(), None).unwrap();
    let clock = crate::time::clock::ManualClock::new();
    let time = clock.handle();
    anim.set_clock(Box::new(clock));

    anim.render().unwrap();
    assert!(!anim.is_done());
    time.set(1501);
    anim.render().unwrap();
    assert!(anim.is_done());
}
