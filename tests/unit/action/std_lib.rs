use super::*;

fn ctx_at(elapsed: u64) -> LayerContext {
    let mut ctx = LayerContext::default();
    ctx.set_elapsed(elapsed);
    ctx
}

#[test]
fn coercion_prefers_specific_types() {
    assert_eq!(coerce_param("true"), ParamValue::Bool(true));
    assert_eq!(coerce_param("FALSE"), ParamValue::Bool(false));
    assert_eq!(coerce_param("42"), ParamValue::Long(42));
    assert_eq!(coerce_param("-0.5"), ParamValue::Double(-0.5));
    assert_eq!(coerce_param("red"), ParamValue::Str("red".to_string()));
    assert_eq!(coerce_param("NaN"), ParamValue::Str("NaN".to_string()));
}

#[test]
fn set_initializer_writes_attributes_and_shorthand() {
    let model = ActionModel::new(STD_LIBRARY, "Set")
        .with_attribute("hello")
        .with_attr("x", "10")
        .with_attr("visible", "true");
    let mut init = SetInitializer::default();
    init.load_model(&model).unwrap();

    let mut ctx = ctx_at(0);
    init.run(&mut ctx).unwrap();
    let p = ctx.parameters();
    assert_eq!(p.get_as_string("value"), "hello");
    assert_eq!(p.get_as_long("x"), 10);
    assert!(p.get_as_bool("visible"));
}

#[test]
fn set_action_completes_after_one_run_unless_looping() {
    let model = ActionModel::new(STD_LIBRARY, "Set").with_attr("alpha", "0.5");
    let mut action = SetAction::default();
    action.load_model(&model).unwrap();

    let mut ctx = ctx_at(0);
    assert!(!action.is_done());
    action.run(&mut ctx).unwrap();
    assert!(action.is_done());
    assert_eq!(ctx.parameters().get_as_double("alpha"), 0.5);

    action.reset();
    action.set_loop(true);
    action.run(&mut ctx).unwrap();
    assert!(!action.is_done());
}

#[test]
fn hold_is_done_strictly_after_its_window() {
    let model = ActionModel::new(STD_LIBRARY, "Hold")
        .with_when("seconds 1")
        .with_attr("duration", "seconds 2");
    let mut hold = HoldAction::default();
    hold.load_model(&model).unwrap();

    hold.run(&mut ctx_at(3000)).unwrap();
    assert!(!hold.is_done());
    hold.run(&mut ctx_at(3001)).unwrap();
    assert!(hold.is_done());
}

#[test]
fn looping_hold_never_completes() {
    let mut hold = HoldAction::default();
    hold.load_model(&ActionModel::new(STD_LIBRARY, "Hold").with_attribute("seconds 1"))
        .unwrap();
    hold.set_loop(true);
    hold.run(&mut ctx_at(50_000)).unwrap();
    assert!(!hold.is_done());
    assert!(hold.is_loop());
}

#[test]
fn tween_interpolates_linearly_from_its_trigger() {
    let model = ActionModel::new(STD_LIBRARY, "Tween")
        .with_when("seconds 1")
        .with_attr("param", "x")
        .with_attr("from", "0")
        .with_attr("to", "100")
        .with_attr("duration", "seconds 2");
    let mut tween = TweenAction::default();
    tween.load_model(&model).unwrap();

    let mut ctx = ctx_at(2000);
    tween.run(&mut ctx).unwrap();
    assert_eq!(ctx.parameters().get_as_double("x"), 50.0);
    assert!(!tween.is_done());

    ctx.set_elapsed(3000);
    tween.run(&mut ctx).unwrap();
    assert_eq!(ctx.parameters().get_as_double("x"), 100.0);
    assert!(tween.is_done());
}

#[test]
fn looping_tween_wraps() {
    let model = ActionModel::new(STD_LIBRARY, "Tween")
        .with_attr("param", "x")
        .with_attr("from", "0")
        .with_attr("to", "10")
        .with_attr("duration", "seconds 1");
    let mut tween = TweenAction::default();
    tween.load_model(&model).unwrap();
    tween.set_loop(true);

    let mut ctx = ctx_at(2500);
    tween.run(&mut ctx).unwrap();
    assert_eq!(ctx.parameters().get_as_double("x"), 5.0);
    assert!(!tween.is_done());
}

#[test]
fn tween_requires_param_and_numbers() {
    let mut tween = TweenAction::default();
    let missing = ActionModel::new(STD_LIBRARY, "Tween").with_attr("from", "0").with_attr("to", "1");
    assert!(tween.load_model(&missing).is_err());

    let bad = missing.with_attr("param", "x").with_attr("to", "lots");
    assert!(matches!(tween.load_model(&bad), Err(JaoError::Validation(_))));
}
