use algoscope_protocol::{ElementState, Rect, RenderCommand, Step, ThemeToken, Viewport};

/// Fraction of each slot a bar fills; the rest is the gap to its neighbour.
const BAR_FILL: f64 = 0.8;

/// Lay out one step as vertical bars along the bottom of the viewport.
///
/// Heights scale with value relative to the largest value in the step, so
/// the tallest bar always spans the full height. Colors come from each
/// element's state.
pub fn render_bars<S, M>(step: &Step<S, M>, viewport: &Viewport) -> Vec<RenderCommand>
where
    S: ElementState + Into<ThemeToken>,
{
    let n = step.len();
    if n == 0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }

    let max_value = step.values().map(|v| v.max(0)).max().unwrap_or(0).max(1);
    let slot = viewport.width / n as f64;
    let bar_w = (slot * BAR_FILL).max(1.0).min(slot);

    let mut commands = Vec::with_capacity(n + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "bars".into(),
        label: None,
    });

    for (i, (element, state)) in step.iter().enumerate() {
        let ratio = f64::from(element.value.max(0)) / f64::from(max_value);
        let h = (viewport.height * ratio).max(1.0);
        let x = i as f64 * slot + (slot - bar_w) / 2.0;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, viewport.height - h, bar_w, h),
            color: state.into(),
            label: Some(element.value.to_string().into()),
            element_id: Some(element.id),
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
