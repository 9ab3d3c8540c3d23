use super::*;

#[test]
fn gradients_wrap_the_root() {
    let base = Graft::nullary("dem");
    for (g, name) in [
        (gradient_x(&base), op_kind::GRADIENT_X),
        (gradient_y(&base), op_kind::GRADIENT_Y),
    ] {
        let op = g.root().as_op().unwrap();
        assert_eq!(op.op_type, name);
        assert_eq!(op.args, vec![base.returns().clone()]);
        assert_eq!(g.len(), 2);
    }
}

#[test]
fn resolution_grafts_are_nullary() {
    assert_eq!(resolution_graft_x().root_op_type(), Some(op_kind::RESOLUTION_X));
    assert_eq!(resolution_graft_y().root_op_type(), Some(op_kind::RESOLUTION_Y));
    assert_eq!(resolution_graft_x().len(), 1);
}
