use egui::{Align2, Color32, Context, FontId, Pos2, Rect, Sense, Stroke};
use egui_wgpu::Renderer;
use egui_winit::State;
use glam::Vec2;
use lab_renderer::{palette, Anchor, Color, Fit, Frame, LineStyle, Shape};
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

use crate::lab::{Lab, Model};
use crate::panels::{self, PanelState};
use crate::scene::{PointerEvent, Scene};

/// Lines per scroll notch are tiny in pixel units
const SCROLL_SCALE: f32 = 0.1;

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub show_diagnostics: bool,
    pub panels: PanelState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: 0.0,
            show_diagnostics: true,
            panels: PanelState::default(),
        }
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Run the UI for one frame and record it into `encoder`.
    ///
    /// Returns the upload command buffers, which must be submitted before the encoder.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
        lab: &mut Lab,
        scene: &mut Scene,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            Self::ui(ctx, ui_state, lab, scene);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let command_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        depth_slice: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }

    fn ui(ctx: &Context, state: &mut UiState, lab: &mut Lab, scene: &mut Scene) {
        egui::TopBottomPanel::top("model_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut selected = lab.active();
                egui::ComboBox::from_label("Model")
                    .selected_text(selected.title())
                    .show_ui(ui, |ui| {
                        for model in Model::ALL {
                            ui.selectable_value(&mut selected, model, model.title());
                        }
                    });
                lab.select(selected);

                if ui.button("Reset").clicked() {
                    lab.reset_active();
                    scene.reset_view(lab.active());
                }
                ui.checkbox(&mut state.show_diagnostics, "Diagnostics");
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(color32(palette::BACKGROUND)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let rect = response.rect;
                scene.resize(Vec2::new(rect.width(), rect.height()));

                let fit = Fit::new(
                    scene.frame_size(lab.active()),
                    Vec2::new(rect.width(), rect.height()),
                );
                for event in pointer_events(ui, &response, rect, &fit) {
                    scene.handle_pointer(lab, event);
                }

                paint_frame(&painter, rect, &fit, &scene.render(lab));
            });

        panels::show(ctx, &mut state.panels, lab, scene);

        if state.show_diagnostics {
            egui::Window::new("Diagnostics")
                .anchor(Align2::RIGHT_BOTTOM, [-10.0, -10.0])
                .resizable(false)
                .collapsible(true)
                .show(ctx, |ui| {
                    ui.label(format!("FPS: {:.1}", state.fps));
                    ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                    ui.label(format!("Model: {}", lab.active()));
                });
        }
    }
}

fn pointer_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: Rect,
    fit: &Fit,
) -> Vec<PointerEvent> {
    let to_frame = |pos: Pos2| fit.invert(Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y));
    let mut events = Vec::new();

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Pressed(to_frame(pos)));
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            let delta = response.drag_delta();
            events.push(PointerEvent::Dragged {
                position: to_frame(pos),
                delta: Vec2::new(delta.x, delta.y),
            });
        }
    }
    if response.drag_stopped() {
        events.push(PointerEvent::Released);
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Clicked(to_frame(pos)));
        }
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            events.push(PointerEvent::Scrolled(scroll * SCROLL_SCALE));
        }
    }
    events
}

pub fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::Center => Align2::CENTER_CENTER,
        Anchor::Left => Align2::LEFT_CENTER,
    }
}

/// Paint a frame into `rect`, scaled to fit
pub fn paint_frame(painter: &egui::Painter, rect: Rect, fit: &Fit, frame: &Frame) {
    let to_pos = |p: Vec2| {
        let q = fit.apply(p);
        Pos2::new(rect.min.x + q.x, rect.min.y + q.y)
    };
    let scale = fit.scale;

    for shape in &frame.shapes {
        match shape {
            Shape::Line {
                points,
                width,
                color,
                style,
            } => {
                let points: Vec<Pos2> = points.iter().map(|&p| to_pos(p)).collect();
                let stroke = Stroke::new(width * scale, color32(*color));
                match style {
                    LineStyle::Solid => {
                        painter.add(egui::Shape::line(points, stroke));
                    }
                    LineStyle::Dashed { dash, gap } => {
                        painter.extend(egui::Shape::dashed_line(
                            &points,
                            stroke,
                            dash * scale,
                            gap * scale,
                        ));
                    }
                }
            }
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let center = to_pos(*center);
                if let Some(fill) = fill {
                    painter.circle_filled(center, radius * scale, color32(*fill));
                }
                if let Some((width, color)) = stroke {
                    painter.circle_stroke(
                        center,
                        radius * scale,
                        Stroke::new(width * scale, color32(*color)),
                    );
                }
            }
            Shape::Rect { min, size, color } => {
                let min = to_pos(*min);
                let rect = Rect::from_min_size(min, egui::vec2(size.x * scale, size.y * scale));
                painter.rect_filled(rect, 0.0, color32(*color));
            }
            Shape::Text {
                position,
                text,
                size,
                color,
                anchor,
                background,
            } => {
                let font = FontId::proportional((size * scale).max(1.0));
                let galley = painter.layout_no_wrap(text.clone(), font, color32(*color));
                let text_rect = align(*anchor).anchor_size(to_pos(*position), galley.size());
                if let Some(background) = background {
                    painter.rect_filled(text_rect.expand(4.0), 4.0, color32(*background));
                }
                painter.galley(text_rect.min, galley, color32(*color));
            }
        }
    }
}
