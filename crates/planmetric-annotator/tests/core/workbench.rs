use planmetric_annotator::model::PlanShape;
use planmetric_annotator::{GeometryKind, HotKey, LengthUnit, ToolMode, Workbench};

fn commit_line(wb: &mut Workbench, y: f64) {
    wb.set_tool(ToolMode::Polyline);
    wb.pointer_pressed(0.0, y);
    wb.pointer_pressed(100.0, y);
    wb.finish_current();
}

#[test]
fn test_initial_state() {
    let wb = Workbench::new(1280.0, 720.0);
    assert_eq!(wb.tool(), ToolMode::Pan);
    assert!(wb.annotations().is_empty());
    assert_eq!(wb.meters_per_pixel(), 0.0);
    assert!(!wb.is_calibrated());
}

#[test]
fn test_polyline_commit_and_default_names() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);
    commit_line(&mut wb, 50.0);

    assert_eq!(wb.annotations().len(), 2);
    assert_eq!(wb.annotations()[0].name, "Line 1");
    assert_eq!(wb.annotations()[1].name, "Line 2");
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_polyline_under_two_points_discarded_silently() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polyline);
    wb.pointer_pressed(10.0, 10.0);
    wb.finish_current();

    assert!(wb.annotations().is_empty());
    assert!(wb.current_points().is_empty());
    assert_eq!(wb.tool(), ToolMode::Pan);
    // A discarded shape never reaches history.
    assert!(!wb.can_undo());
}

#[test]
fn test_polygon_auto_close_near_first_point() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);
    wb.pointer_pressed(100.0, 100.0);
    wb.pointer_pressed(0.0, 100.0);
    // Within the 20 px closing threshold of the first vertex: the ring
    // closes on the existing first point, no fifth vertex is added.
    wb.pointer_pressed(5.0, 5.0);

    assert_eq!(wb.annotations().len(), 1);
    let annotation = &wb.annotations()[0];
    assert_eq!(annotation.kind(), GeometryKind::Polygon);
    assert_eq!(annotation.geometry.points().len(), 4);
    assert_eq!(annotation.name, "Area 1");
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_polygon_close_threshold_scales_with_zoom() {
    let mut wb = Workbench::new(1280.0, 720.0);
    // At 2x zoom the image-space threshold halves to 10 px.
    wb.viewport_mut().set_scale(2.0);

    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(200.0, 0.0);
    wb.pointer_pressed(200.0, 200.0);
    wb.pointer_pressed(0.0, 200.0);
    // 15 image px from the first vertex: outside the scaled threshold,
    // so it is appended as a fifth vertex.
    wb.pointer_pressed(30.0, 0.0);

    assert!(wb.annotations().is_empty());
    assert_eq!(wb.current_points().len(), 5);
}

#[test]
fn test_polygon_explicit_finish() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);
    wb.pointer_pressed(100.0, 100.0);
    wb.finish_current();

    assert_eq!(wb.annotations().len(), 1);
    assert_eq!(wb.annotations()[0].geometry.points().len(), 3);
}

#[test]
fn test_polygon_under_three_points_discarded() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);
    wb.finish_current();

    assert!(wb.annotations().is_empty());
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_polygon_colors_skip_used_then_cycle() {
    let mut wb = Workbench::new(1280.0, 720.0);
    let commit_triangle = |wb: &mut Workbench, x: f64| {
        wb.set_tool(ToolMode::Polygon);
        wb.pointer_pressed(x, 0.0);
        wb.pointer_pressed(x + 100.0, 0.0);
        wb.pointer_pressed(x + 100.0, 100.0);
        wb.finish_current();
    };

    commit_triangle(&mut wb, 0.0);
    commit_triangle(&mut wb, 200.0);
    let first = wb.annotations()[0].color().map(str::to_string);
    let second = wb.annotations()[1].color().map(str::to_string);
    assert!(first.is_some());
    assert_ne!(first, second);

    // Recoloring the first polygon to the palette head frees its slot;
    // the next polygon takes the first unused entry.
    let first_id = wb.annotations()[0].id.clone();
    assert!(wb.set_annotation_color(&first_id, "#000000"));
    commit_triangle(&mut wb, 400.0);
    let third = wb.annotations()[2].color().map(str::to_string);
    assert_eq!(third, first);
}

#[test]
fn test_temporary_pan_preserves_construction() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polyline);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);

    // Selecting Pan mid-construction suspends instead of discarding.
    wb.set_tool(ToolMode::Pan);
    assert!(wb.in_temporary_pan());
    assert_eq!(wb.tool(), ToolMode::Pan);
    assert_eq!(wb.current_points().len(), 2);

    // Dragging pans the viewport without touching the points.
    wb.pointer_pressed(500.0, 500.0);
    wb.pointer_moved(540.0, 520.0);
    wb.pointer_released(540.0, 520.0);
    assert_eq!(wb.viewport().offset(), (40.0, 20.0));
    assert_eq!(wb.current_points().len(), 2);

    // Re-selecting the suspended tool resumes construction.
    wb.set_tool(ToolMode::Polyline);
    assert!(!wb.in_temporary_pan());
    // The pan moved the viewport, so the same device click now lands on
    // a shifted image coordinate.
    wb.pointer_pressed(240.0, 20.0);
    wb.finish_current();

    let annotation = &wb.annotations()[0];
    assert_eq!(annotation.geometry.points().len(), 3);
    let last = annotation.geometry.points()[2];
    assert!((last.x - 200.0).abs() < 1e-9);
    assert!((last.y - 0.0).abs() < 1e-9);
}

#[test]
fn test_switching_to_other_tool_discards_construction() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polyline);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);

    wb.set_tool(ToolMode::Polygon);
    assert!(wb.current_points().is_empty());
    assert!(!wb.in_temporary_pan());
    assert_eq!(wb.tool(), ToolMode::Polygon);
}

#[test]
fn test_pan_hold_key_round_trip() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);

    wb.hotkey_pressed(HotKey::PanHold);
    assert_eq!(wb.tool(), ToolMode::Pan);
    assert!(wb.in_temporary_pan());

    wb.hotkey_released(HotKey::PanHold);
    assert_eq!(wb.tool(), ToolMode::Polygon);
    assert_eq!(wb.current_points().len(), 1);
}

#[test]
fn test_cancel_exits_temporary_pan_first() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Polyline);
    wb.pointer_pressed(0.0, 0.0);
    wb.set_tool(ToolMode::Pan);
    assert!(wb.in_temporary_pan());

    // First cancel only exits the pan override; construction survives.
    wb.hotkey_pressed(HotKey::Cancel);
    assert_eq!(wb.tool(), ToolMode::Polyline);
    assert_eq!(wb.current_points().len(), 1);

    // Second cancel discards the work and returns to Pan.
    wb.hotkey_pressed(HotKey::Cancel);
    assert!(wb.current_points().is_empty());
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_hotkeys_ignored_while_text_input_focused() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);

    wb.set_text_input_focus(true);
    wb.hotkey_pressed(HotKey::Undo);
    assert_eq!(wb.annotations().len(), 1);

    wb.set_text_input_focus(false);
    wb.hotkey_pressed(HotKey::Undo);
    assert!(wb.annotations().is_empty());
}

#[test]
fn test_undo_walks_back_through_commits() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);
    commit_line(&mut wb, 50.0);
    commit_line(&mut wb, 100.0);

    wb.undo();
    assert_eq!(wb.annotations().len(), 2);

    wb.undo();
    assert_eq!(wb.annotations().len(), 1);

    wb.undo();
    assert!(wb.annotations().is_empty());
    assert_eq!(wb.meters_per_pixel(), 0.0);

    // A fourth undo from the empty baseline stays at the baseline.
    wb.undo();
    assert!(wb.annotations().is_empty());
    assert_eq!(wb.meters_per_pixel(), 0.0);
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_undo_discards_construction_in_progress() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);

    wb.set_tool(ToolMode::Polygon);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(100.0, 0.0);

    wb.undo();
    assert!(wb.current_points().is_empty());
    assert!(wb.annotations().is_empty());
    assert_eq!(wb.tool(), ToolMode::Pan);
}

#[test]
fn test_field_edits_are_undoable() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);
    let id = wb.annotations()[0].id.clone();

    assert!(wb.rename_annotation(&id, "Hallway"));
    assert!(wb.set_annotation_notes(&id, "north wall"));
    assert_eq!(wb.annotations()[0].name, "Hallway");

    wb.undo();
    assert_eq!(wb.annotations()[0].notes, "");
    wb.undo();
    assert_eq!(wb.annotations()[0].name, "Line 1");
}

#[test]
fn test_rename_to_empty_is_refused_without_history_noise() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);
    let id = wb.annotations()[0].id.clone();

    assert!(!wb.rename_annotation(&id, ""));
    assert_eq!(wb.annotations()[0].name, "Line 1");

    // The refused edit must not have produced a snapshot: one undo
    // removes the commit itself.
    wb.undo();
    assert!(wb.annotations().is_empty());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);

    assert!(!wb.delete_annotation("no-such-id"));
    assert_eq!(wb.annotations().len(), 1);
}

#[test]
fn test_reorder_is_undoable() {
    let mut wb = Workbench::new(1280.0, 720.0);
    commit_line(&mut wb, 0.0);
    commit_line(&mut wb, 50.0);
    let second_id = wb.annotations()[1].id.clone();

    assert!(wb.move_annotation_up(&second_id));
    assert_eq!(wb.annotations()[0].id, second_id);

    wb.undo();
    assert_eq!(wb.annotations()[1].id, second_id);
}

#[test]
fn test_crop_produces_scratch_selection_not_annotation() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Crop);
    wb.pointer_pressed(50.0, 80.0);
    wb.pointer_moved(120.0, 100.0);
    wb.pointer_released(10.0, 10.0);

    assert!(wb.annotations().is_empty());
    let rect = wb.crop_selection().expect("drag produced a selection");
    // Normalized regardless of drag direction.
    assert_eq!(rect.x, 10.0);
    assert_eq!(rect.y, 10.0);
    assert_eq!(rect.width, 40.0);
    assert_eq!(rect.height, 70.0);

    // The exporter consumes it exactly once.
    assert!(wb.take_crop_selection().is_some());
    assert!(wb.take_crop_selection().is_none());
}

#[test]
fn test_wheel_zoom_routes_through_viewport_clamp() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.wheel_zoom(100, 640.0, 360.0);
    assert_eq!(wb.viewport().scale(), 5.0);
}

#[test]
fn test_calibration_first_point_survives_temporary_pan() {
    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Calibrate);
    wb.pointer_pressed(100.0, 100.0);

    wb.set_tool(ToolMode::Pan);
    assert!(wb.in_temporary_pan());

    wb.set_tool(ToolMode::Calibrate);
    wb.pointer_pressed(300.0, 100.0);

    // The armed first point survived the pan override: one segment, one
    // open prompt.
    assert_eq!(wb.annotations().len(), 1);
    let request = wb.calibration_request().expect("prompt open");
    assert!((request.pixel_length - 200.0).abs() < 1e-9);
    wb.submit_calibration("2", LengthUnit::Meters).expect("valid");
    assert!((wb.meters_per_pixel() - 0.01).abs() < 1e-12);
}

#[test]
fn test_unit_switch_reformats_table_live() {
    use planmetric_annotator::MeasurementSystem;

    let mut wb = Workbench::new(1280.0, 720.0);
    wb.set_tool(ToolMode::Calibrate);
    wb.pointer_pressed(0.0, 0.0);
    wb.pointer_pressed(200.0, 0.0);
    wb.submit_calibration("4", LengthUnit::Meters).expect("valid");

    commit_line(&mut wb, 50.0); // 100 px = 2 m

    assert_eq!(wb.measurement_table()[1].measurement, "2.00 m");
    wb.set_units(MeasurementSystem::Imperial);
    assert_eq!(wb.measurement_table()[1].measurement, "6.56 ft");
}
