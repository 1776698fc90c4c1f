use super::*;

#[test]
fn trace_renderer_snapshots_parameters() {
    let mut r = TraceRenderer::default();
    let data_type = DataTypeModel {
        kind: "text".to_string(),
        ..DataTypeModel::default()
    };
    r.set_data_type(&data_type, None).unwrap();

    let mut ctx = LayerContext::new(data_type);
    ctx.parameters_mut().insert("x", 3_i64);
    ctx.parameters_mut().insert("label", "hi");
    r.render(&ctx).unwrap();
    r.render(&ctx).unwrap();

    assert_eq!(r.frames(), 2);
    let snap = r.last_snapshot().unwrap();
    assert_eq!(snap["x"], 3);
    assert_eq!(snap["label"], "hi");
}

#[test]
fn factories_build_fresh_renderers() {
    let factory = TraceRenderer::factory();
    let a = factory.create().unwrap();
    assert!(format!("{a:?}").contains("frames: 0"));
    assert!(NullRenderer::factory().create().is_ok());
}

#[test]
fn boxed_renderers_clone_deeply() {
    let mut r: Box<dyn Renderer> = Box::new(TraceRenderer::default());
    r.render(&LayerContext::default()).unwrap();
    let copy = r.clone();
    r.render(&LayerContext::default()).unwrap();
    assert!(format!("{copy:?}").contains("frames: 1"));
    assert!(format!("{r:?}").contains("frames: 2"));
}
