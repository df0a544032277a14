use std::time::Instant;

use futures::executor::block_on;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use imgui::im_str;

#[allow(dead_code)]
mod grids;
use grids::wall_grid::GRID_SCALE;

#[allow(dead_code)]
mod renderer;
use renderer::GraphicsContext;

#[allow(dead_code)]
mod generators;
use generators::backtracker::RecursiveBacktracker;
use generators::Generator;

#[allow(dead_code)]
mod clock;
use clock::StepClock;

const DEFAULT_ROWS: u16 = 20;
const DEFAULT_COLS: u16 = 20;
const DEFAULT_RATE: u16 = 60;

pub struct State {
    pub gfx_ctx: GraphicsContext,
    pub maze_generator: Box<dyn Generator>,
    pub clock: StepClock,
    pub running: bool,

    pub rows: u16,
    pub cols: u16,
    pub rate: u16,
    pub cell_scale: f32,
}

impl State {
    fn update(&mut self) {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        if rows != self.maze_generator.grid().dims.rows
            || cols != self.maze_generator.grid().dims.columns
        {
            self.maze_generator = Box::new(RecursiveBacktracker::new(rows, cols));
            self.running = false;
        }

        self.clock.set_rate(self.rate as f32);
    }

    fn render(&mut self, view: &wgpu::TextureView, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.gfx_ctx.start(view, device, queue);

        let verts = self
            .maze_generator
            .grid()
            .render(self.gfx_ctx.size, self.cell_scale);

        self.gfx_ctx.draw(&verts, view, device);

        self.gfx_ctx.render(queue);
    }
}

fn main() {
    env_logger::init();
    log::info!("starting maze-backtrack");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("maze-backtrack")
        .build(&event_loop)
        .unwrap();
    let hidpi_factor = window.scale_factor();

    let instance = wgpu::Instance::new(wgpu::BackendBit::PRIMARY);
    let surface = unsafe { instance.create_surface(&window) };
    let size = window.inner_size();

    let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::Default,
        compatible_surface: Some(&surface),
    }))
    .unwrap();

    // Since main can't be async, we're going to need to block
    let (device, mut queue) = block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            features: wgpu::Features::empty(),
            limits: wgpu::Limits::default(),
            shader_validation: true,
        },
        None, // Trace path
    ))
    .unwrap();

    let sc_desc = wgpu::SwapChainDescriptor {
        usage: wgpu::TextureUsage::OUTPUT_ATTACHMENT,
        format: wgpu::TextureFormat::Bgra8UnormSrgb,
        width: size.width,
        height: size.height,
        present_mode: wgpu::PresentMode::Fifo,
    };

    let mut swap_chain = device.create_swap_chain(&surface, &sc_desc);

    // Set up dear imgui
    let mut imgui = imgui::Context::create();
    let mut platform = imgui_winit_support::WinitPlatform::init(&mut imgui);
    platform.attach_window(
        imgui.io_mut(),
        &window,
        imgui_winit_support::HiDpiMode::Default,
    );
    imgui.set_ini_filename(None);

    let font_size = (13.0 * hidpi_factor) as f32;
    imgui.io_mut().font_global_scale = (1.0 / hidpi_factor) as f32;

    imgui
        .fonts()
        .add_font(&[imgui::FontSource::DefaultFontData {
            config: Some(imgui::FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

    let gfx_ctx = block_on(GraphicsContext::new(&window, &device, &sc_desc));

    let mut renderer = imgui_wgpu::Renderer::new(&mut imgui, &device, &mut queue, sc_desc.format);

    let maze_generator = Box::new(RecursiveBacktracker::new(
        DEFAULT_ROWS as usize,
        DEFAULT_COLS as usize,
    ));

    let mut state = State {
        gfx_ctx,
        maze_generator,
        clock: StepClock::with_rate(DEFAULT_RATE as f32),
        running: false,
        rows: DEFAULT_ROWS,
        cols: DEFAULT_COLS,
        rate: DEFAULT_RATE,
        cell_scale: GRID_SCALE,
    };

    let mut last_frame = Instant::now();
    let mut last_cursor = None;

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                let size = window.inner_size();

                let sc_desc = wgpu::SwapChainDescriptor {
                    usage: wgpu::TextureUsage::OUTPUT_ATTACHMENT,
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    width: size.width,
                    height: size.height,
                    present_mode: wgpu::PresentMode::Fifo,
                };

                swap_chain = device.create_swap_chain(&surface, &sc_desc);
                state.gfx_ctx.resize(size);
            }
            Event::RedrawRequested(_) => {
                let delta_s = last_frame.elapsed();
                let now = Instant::now();
                imgui.io_mut().update_delta_time(now - last_frame);
                last_frame = now;

                let frame = match swap_chain.get_current_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        eprintln!("dropped frame: {:?}", e);
                        return;
                    }
                };
                platform
                    .prepare_frame(imgui.io_mut(), &window)
                    .expect("Failed to prepare frame");
                let ui = imgui.frame();

                {
                    let window = imgui::Window::new(im_str!("Maze Controls"));
                    window
                        .size([300.0, 280.0], imgui::Condition::FirstUseEver)
                        .build(&ui, || {
                            ui.text(im_str!("Frametime: {:?}", delta_s));
                            ui.separator();

                            imgui::Slider::new(im_str!("rows"))
                                .range(1..=255)
                                .build(&ui, &mut state.rows);

                            imgui::Slider::new(im_str!("columns"))
                                .range(1..=255)
                                .build(&ui, &mut state.cols);

                            imgui::Slider::new(im_str!("steps / sec"))
                                .range(1..=240)
                                .build(&ui, &mut state.rate);

                            imgui::Slider::new(im_str!("cell scale"))
                                .range(0.2..=1.9)
                                .build(&ui, &mut state.cell_scale);

                            ui.separator();

                            if ui.button(im_str!("Start"), [80., 20.]) {
                                if !state.maze_generator.is_started() {
                                    state.maze_generator.start();
                                }
                                state.clock.reset();
                                state.running = true;
                            }
                            ui.same_line(100.);
                            if ui.button(im_str!("Stop"), [80., 20.]) {
                                state.running = false;
                            }
                            ui.same_line(190.);
                            if ui.button(im_str!("Reset"), [80., 20.]) {
                                state.maze_generator.reset();
                                state.clock.reset();
                                state.running = false;
                            }

                            ui.separator();

                            if ui.button(im_str!("Step Maze"), [125., 20.]) {
                                if !state.maze_generator.is_started() {
                                    state.maze_generator.start();
                                } else {
                                    state.maze_generator.next_step();
                                }
                            }
                            ui.same_line(150.);
                            if ui.button(im_str!("Generate Maze"), [125., 20.]) {
                                state.maze_generator.generate_maze();
                                state.running = false;
                            }
                        });
                }

                if state.running && state.clock.due(Instant::now()) {
                    state.maze_generator.step_generation();
                    if state.maze_generator.is_done() {
                        state.running = false;
                        log::info!("maze generation complete");
                    }
                }

                state.update();
                state.render(&frame.output.view, &device, &queue);

                let mut encoder: wgpu::CommandEncoder =
                    device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

                if last_cursor != Some(ui.mouse_cursor()) {
                    last_cursor = Some(ui.mouse_cursor());
                    platform.prepare_render(&ui, &window);
                }

                let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    color_attachments: &[wgpu::RenderPassColorAttachmentDescriptor {
                        attachment: &frame.output.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: true,
                        },
                    }],
                    depth_stencil_attachment: None,
                });

                renderer
                    .render(ui.render(), &queue, &device, &mut rpass)
                    .expect("Rendering failed");

                drop(rpass);

                queue.submit(Some(encoder.finish()));
            }
            Event::MainEventsCleared => {
                // RedrawRequested will only trigger once, unless we manually
                // request it.
                window.request_redraw();
            }
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput { input, .. } => match input {
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        ..
                    } => *control_flow = ControlFlow::Exit,
                    _ => {}
                },
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    // new_inner_size is &&mut so we have to dereference it twice
                    state.gfx_ctx.resize(**new_inner_size);
                }
                _ => {}
            },
            _ => {}
        }
        platform.handle_event(imgui.io_mut(), &window, &event);
    });
}
