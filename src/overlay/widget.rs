// SPDX-License-Identifier: MPL-2.0

//! Barcode mask widget
//!
//! Lays out the wrapped content (usually the camera preview) to fill the
//! available space and paints a [`MaskFrame`] on top of it. Presses inside the
//! viewfinder publish the caller's message; everything else reaches the
//! content untouched.

use super::MaskFrame;
use super::brackets::Outline;
use cosmic::iced::advanced::widget::{Operation, Tree};
use cosmic::iced::advanced::{Clipboard, Layout, Shell, Widget, layout, mouse, renderer};
use cosmic::iced::event::Status;
use cosmic::iced::{Border, Color, Element, Event, Length, Point, Rectangle, Size, touch};
use cosmic::{Renderer, Theme};
use tracing::debug;

/// A press inside the viewfinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    /// Position relative to the viewfinder's top-left corner
    pub position: Point,
    /// Position in window coordinates
    pub screen_position: Point,
}

/// Mask overlay drawn above a content element
pub struct BarcodeMask<'a, Message> {
    content: Element<'a, Message, Theme, Renderer>,
    frame: MaskFrame,
    on_press: Option<Box<dyn Fn(TapEvent) -> Message + 'a>>,
}

/// Wrap `content` with the mask described by `frame`
pub fn barcode_mask<'a, Message>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
    frame: MaskFrame,
) -> BarcodeMask<'a, Message> {
    BarcodeMask::new(content, frame)
}

impl<'a, Message> BarcodeMask<'a, Message> {
    pub fn new(
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
        frame: MaskFrame,
    ) -> Self {
        Self {
            content: content.into(),
            frame,
            on_press: None,
        }
    }

    /// Publish a message built from the tap when the viewfinder is pressed
    pub fn on_press_with(mut self, on_press: impl Fn(TapEvent) -> Message + 'a) -> Self {
        self.on_press = Some(Box::new(on_press));
        self
    }

    /// Publish `message` when the viewfinder is pressed, ignoring the tap details
    pub fn on_press(self, message: Message) -> Self
    where
        Message: Clone + 'a,
    {
        self.on_press_with(move |_| message.clone())
    }
}

fn translate(rect: Rectangle, origin: Point) -> Rectangle {
    Rectangle {
        x: rect.x + origin.x,
        y: rect.y + origin.y,
        ..rect
    }
}

/// Resolve a press at `point` against the viewfinder of `frame` drawn at `origin`
pub fn hit_viewfinder(frame: &MaskFrame, origin: Point, point: Point) -> Option<TapEvent> {
    let viewfinder = translate(frame.geometry.viewfinder, origin);
    if viewfinder.width <= 0.0 || viewfinder.height <= 0.0 || !viewfinder.contains(point) {
        return None;
    }
    Some(TapEvent {
        position: Point::new(point.x - viewfinder.x, point.y - viewfinder.y),
        screen_position: point,
    })
}

fn fill(renderer: &mut Renderer, bounds: Rectangle, radii: [f32; 4], color: Color) {
    use cosmic::iced::advanced::Renderer as _;

    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return;
    }
    renderer.fill_quad(
        renderer::Quad {
            bounds,
            border: Border {
                radius: radii.into(),
                ..Default::default()
            },
            shadow: Default::default(),
        },
        color,
    );
}

/// Paint a bracket outline, clipping away its suppressed borders
fn outline(renderer: &mut Renderer, outline: Outline, origin: Point, color: Color) {
    use cosmic::iced::advanced::Renderer as _;

    if outline.border_width <= 0.0 || outline.clip.width <= 0.0 || outline.clip.height <= 0.0 {
        return;
    }
    renderer.with_layer(translate(outline.clip, origin), |renderer| {
        renderer.fill_quad(
            renderer::Quad {
                bounds: translate(outline.quad, origin),
                border: Border {
                    color,
                    width: outline.border_width,
                    radius: outline.radii.into(),
                },
                shadow: Default::default(),
            },
            Color::TRANSPARENT,
        );
    });
}

impl<'a, Message> Widget<Message, Theme, Renderer> for BarcodeMask<'a, Message> {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&mut self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_mut(&mut self.content));
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let size = limits.max();
        let content_limits = layout::Limits::new(Size::ZERO, size);
        let content = self
            .content
            .as_widget()
            .layout(&mut tree.children[0], renderer, &content_limits);

        layout::Node::with_children(size, vec![content])
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        use cosmic::iced::advanced::Renderer as _;

        let bounds = layout.bounds();

        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget().draw(
                &tree.children[0],
                renderer,
                theme,
                style,
                content_layout,
                cursor,
                viewport,
            );
        }

        let origin = bounds.position();
        let frame = &self.frame;

        // Separate layer keeps the mask above primitives drawn by the content
        renderer.with_layer(bounds, |renderer| {
            for region in frame.geometry.shaded_regions() {
                fill(renderer, translate(region, origin), [0.0; 4], frame.panel_color);
            }

            if let Some(line) = &frame.line {
                fill(renderer, translate(line.bounds, origin), [0.0; 4], line.color);
            }

            for bracket in &frame.brackets {
                outline(renderer, bracket.outline(), origin, bracket.color);
            }
        });
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> Status {
        if let Some(on_press) = &self.on_press {
            let origin = layout.bounds().position();
            let pressed_at = match &event {
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    cursor.position()
                }
                Event::Touch(touch::Event::FingerPressed { position, .. }) => Some(*position),
                _ => None,
            };

            if let Some(tap) =
                pressed_at.and_then(|point| hit_viewfinder(&self.frame, origin, point))
            {
                debug!(x = tap.position.x, y = tap.position.y, "Viewfinder pressed");
                shell.publish(on_press(tap));
                return Status::Captured;
            }
        }

        let Some(content_layout) = layout.children().next() else {
            return Status::Ignored;
        };
        self.content.as_widget_mut().on_event(
            &mut tree.children[0],
            event,
            content_layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        )
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        if self.on_press.is_some() {
            let origin = layout.bounds().position();
            let over_viewfinder = cursor
                .position()
                .and_then(|point| hit_viewfinder(&self.frame, origin, point))
                .is_some();
            if over_viewfinder {
                return mouse::Interaction::Pointer;
            }
        }

        layout
            .children()
            .next()
            .map(|content_layout| {
                self.content.as_widget().mouse_interaction(
                    &tree.children[0],
                    content_layout,
                    cursor,
                    viewport,
                    renderer,
                )
            })
            .unwrap_or_default()
    }

    fn operate(
        &self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget().operate(
                &mut tree.children[0],
                content_layout,
                renderer,
                operation,
            );
        }
    }
}

impl<'a, Message: 'a> From<BarcodeMask<'a, Message>> for Element<'a, Message, Theme, Renderer> {
    fn from(widget: BarcodeMask<'a, Message>) -> Self {
        Element::new(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaskConfig;
    use crate::display_metrics::ViewportReading;
    use crate::overlay::MaskOverlay;
    use std::time::Instant;

    fn frame() -> MaskFrame {
        MaskOverlay::new(
            MaskConfig::default(),
            ViewportReading::new(375.0, 667.0),
            Instant::now(),
        )
        .frame()
    }

    #[test]
    fn test_hit_inside_viewfinder() {
        let tap = hit_viewfinder(&frame(), Point::ORIGIN, Point::new(50.0, 200.0))
            .expect("point is inside the viewfinder");
        assert_eq!(tap.position, Point::new(2.5, 16.5));
        assert_eq!(tap.screen_position, Point::new(50.0, 200.0));
    }

    #[test]
    fn test_hit_outside_viewfinder() {
        assert!(hit_viewfinder(&frame(), Point::ORIGIN, Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_hit_respects_widget_origin() {
        let origin = Point::new(0.0, 100.0);
        assert!(hit_viewfinder(&frame(), origin, Point::new(50.0, 200.0)).is_none());
        assert!(hit_viewfinder(&frame(), origin, Point::new(50.0, 300.0)).is_some());
    }
}
