//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of the application: it owns its cards,
//! reacts to input and says what to draw each frame. The host owns the window,
//! GPU context and input sampler, hands events to every flow and composes
//! their renders.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S, E>`] is the trait for scenes that handle events and rendering
//! - [`Out<S, E>`] is the output type for async event handling and context configuration
//!
//! # Lifecycle
//!
//! Each frame the host:
//! 1. Samples input into a [`FrameInput`] (clock, pointer, viewport, scroll)
//! 2. Eases the camera toward the pointer and uploads the camera uniform
//! 3. Calls `on_update` on every flow, which advances animations and writes uniforms
//! 4. Collects every flow's [`Render`] and draws the batches
//! 5. Presents the frame
//!
//! Pointer motion is picked against all flows between frames: the nearest card
//! under the pointer gets `on_hover`, a left click on it gets `on_click`.

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::Ray,
    context::{Context, InitContext},
    data_structures::texture::Texture,
    input::{FrameInput, MouseButtonState},
    pick::Hit,
    render::{InstancedDraw, PlaneDraw, Render, draw_batches},
};

///
/// This is the Output Type for every lifecycle hook where the user can pass async events that are
/// handled according to the platform you're running on.
///
/// `Out::FutEvent` can be used to resolve a future of an Event that is put in the Event Queue after
/// being resolved. The caller is responsible for handling the event later on and it will have no
/// side effects unless handled.
///
/// `Out::FutFn` can be used to directly modify the state and the mutation is handled internally with
/// no further action required by the callee.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to change the
/// clear colour, the camera sway or the fold constants of a variant.
///
/// `Empty` is the default output used when no eventing/futures need to be handled.
///
pub enum Out<S, E> {
    FutEvent(Vec<Box<dyn Future<Output = E>>>),
    FutFn(Vec<Box<dyn Future<Output = Box<dyn FnOnce(&mut S)>>>>),
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

impl<S, E> Default for Out<S, E> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure the context here
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_hover()` is called when the pointer enters or leaves one of this flow's cards
/// 4. `on_click()` is called when one of this flow's cards is clicked
/// 5. `on_update()` is called every frame before drawing
/// 6. `on_custom_events()` is called for custom application events
/// 7. `on_render()` is called each frame and specifies how to render `self`
pub trait GraphicsFlow<S, E> {
    /// Initialize the flow and configure the context.
    ///
    /// This is the place to set the background colour, camera sway or fold
    /// constants before the first frame.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out<S, E>;

    /// Handle a click on a card rendered by this flow.
    ///
    /// `id` is the id the flow reported from [`pick`](Self::pick).
    fn on_click(&mut self, _ctx: &Context, _state: &mut S, _id: u32) -> Out<S, E> {
        Out::Empty
    }

    /// The pointer entered (`entered == true`) or left one of this flow's cards.
    fn on_hover(&mut self, _ctx: &Context, _state: &mut S, _id: u32, _entered: bool) -> Out<S, E> {
        Out::Empty
    }

    /// Update state every frame.
    ///
    /// `frame` is the input snapshot of this frame, `dt` the time since the
    /// last one. Advance animations and write uniforms here.
    fn on_update(&mut self, ctx: &Context, state: &mut S, frame: &FrameInput, dt: Duration) -> Out<S, E>;

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, _ctx: &Context, _state: &mut S, _event: &WindowEvent) -> Out<S, E> {
        Out::Empty
    }

    /// Handle custom application events.
    ///
    /// Returns the event if it was not consumed, allowing it to be passed to
    /// the next flow. Returning `None` means the event was consumed.
    fn on_custom_events(&mut self, _ctx: &Context, _state: &mut S, event: E) -> Option<E> {
        Some(event)
    }

    /// Return renderable objects for this flow.
    ///
    /// Called each frame. The engine batches all flows' renders per pipeline.
    fn on_render<'pass>(&self) -> Render<'_, 'pass>;

    /// Nearest of this flow's cards hit by `ray`, if any.
    fn pick(&self, _ctx: &Context, _ray: &Ray) -> Option<Hit> {
        None
    }
}

// Dummy impl to make wasm work
impl<State, Event> Debug for dyn GraphicsFlow<State, Event> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows lazy initialization and resource loading.
pub type FlowConstructor<S, E> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S, E>>>>>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
            let viewport = self.ctx.viewport();
            self.ctx.input.resize(width, height, viewport);
        }
    }

    fn render<Event>(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<State, Event>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut planes: Vec<PlaneDraw> = Vec::new();
            let mut instanced: Vec<InstancedDraw> = Vec::new();
            graphics_flows.iter().for_each(|flow| {
                flow.on_render()
                    .set_pipelines(&self.ctx, &mut render_pass, &mut planes, &mut instanced);
            });
            draw_batches(&self.ctx, &mut render_pass, &planes, &instanced);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Nearest hit under the pointer across all flows, with the index of the
/// flow that owns it.
fn pick_flows<State, Event>(
    ctx: &Context,
    flows: &[Box<dyn GraphicsFlow<State, Event>>],
) -> Option<(usize, Hit)> {
    let ray = ctx.pointer_ray()?;
    flows
        .iter()
        .enumerate()
        .filter_map(|(i, flow)| flow.pick(ctx, &ray).map(|hit| (i, hit)))
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

pub struct App<State: 'static, Event: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<State, Event>>,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    // Taken once the window exists.
    constructors: Option<Vec<FlowConstructor<State, Event>>>,
    last_time: Instant,
    /// Flow index and id of the card under the pointer.
    hovered: Option<(usize, u32)>,
}

impl<State, Event> App<State, Event>
where
    State: 'static + Default,
    Event: 'static,
{
    fn new(
        event_loop: &EventLoop<FlowEvent<State, Event>>,
        constructors: Vec<FlowConstructor<State, Event>>,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            hovered: None,
        })
    }

    fn dispatch(&mut self, flow_index: usize, f: impl FnOnce(&mut Box<dyn GraphicsFlow<State, Event>>, &Context, &mut State) -> Out<State, Event>) {
        let Some(app_state) = &mut self.state else {
            return;
        };
        let Some(flow) = self.graphics_flows.get_mut(flow_index) else {
            return;
        };
        let out = f(flow, &app_state.ctx, &mut app_state.state);
        handle_flow_output(
            #[cfg(not(target_arch = "wasm32"))]
            &self.async_runtime,
            &mut app_state.state,
            &mut app_state.ctx,
            self.proxy.clone(),
            out,
        );
    }

    /// Re-pick under the pointer and send hover transitions.
    fn update_hover(&mut self) {
        let current = match &self.state {
            Some(app_state) => pick_flows(&app_state.ctx, &self.graphics_flows).map(|(i, hit)| (i, hit.id)),
            None => return,
        };
        self.set_hovered(current);
    }

    fn set_hovered(&mut self, current: Option<(usize, u32)>) {
        if current == self.hovered {
            return;
        }
        if let Some((flow_index, id)) = self.hovered.take() {
            self.dispatch(flow_index, |flow, ctx, state| flow.on_hover(ctx, state, id, false));
        }
        if let Some((flow_index, id)) = current {
            self.dispatch(flow_index, |flow, ctx, state| flow.on_hover(ctx, state, id, true));
        }
        self.hovered = current;
    }

    fn click(&mut self) {
        let picked = match &self.state {
            Some(app_state) => pick_flows(&app_state.ctx, &self.graphics_flows),
            None => return,
        };
        if let Some((flow_index, hit)) = picked {
            log::debug!("Clicked {} of flow {}", hit.id, flow_index);
            self.dispatch(flow_index, |flow, ctx, state| flow.on_click(ctx, state, hit.id));
        }
    }

    fn init_flows(&mut self) {
        let Some(app_state) = &mut self.state else {
            return;
        };
        self.graphics_flows.iter_mut().for_each(|flow| {
            let events = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut app_state.state,
                &mut app_state.ctx,
                self.proxy.clone(),
                events,
            );
        });
    }

    fn redraw(&mut self) {
        let dt = self.last_time.elapsed();
        self.last_time = Instant::now();

        let Some(app_state) = &mut self.state else {
            return;
        };

        let frame = app_state.ctx.frame_input();
        let pointer = frame.pointer;
        let ctx = &mut app_state.ctx;
        ctx.camera.camera.follow_pointer(pointer);
        ctx.camera.write_to_buffer(&ctx.queue, &ctx.projection);

        self.graphics_flows.iter_mut().for_each(|f| {
            let events = f.on_update(&app_state.ctx, &mut app_state.state, &frame, dt);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut app_state.state,
                &mut app_state.ctx,
                self.proxy.clone(),
                events,
            );
        });

        match app_state.render(&self.graphics_flows) {
            Ok(_) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }
}

pub(crate) enum FlowEvent<State: 'static, Event: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    },
    #[allow(dead_code)]
    Mut(Box<dyn FnOnce(&mut State)>),
    Custom(Event),
    #[allow(dead_code)]
    Exit,
}

impl<State, Event> Debug for FlowEvent<State, Event> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Mut(_) => f.write_str("Mut(|&mut State| -> {...})"),
            Self::Custom(_) => f.write_str("Custom(E)"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

impl<State: 'static + Default, Event: 'static> ApplicationHandler<FlowEvent<State, Event>>
    for App<State, Event>
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // resumed again after a suspend, everything already exists
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("foldgrid");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("No element with id '{}', letting winit create a canvas", CANVAS_ID),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::new(window).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // Device and Queue are internally reference counted, so this only clones handles
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => {
                    self.graphics_flows = flows;
                    self.state = Some(app_state);
                    self.init_flows();
                }
                Err(e) => {
                    log::error!("App initialization failed. Cannot create the main context: {}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy.send_event(FlowEvent::Initialized { state, flows }).is_err() {
                            log::error!("Event loop closed before initialization finished");
                        }
                    }
                    Err(e) => {
                        log::error!("App initialization failed: {}", e);
                        let _ = proxy.send_event(FlowEvent::Exit);
                    }
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<State, Event>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                self.state = Some(state);
                self.graphics_flows = flows;

                if let Some(app_state) = &mut self.state {
                    let size = app_state.ctx.window.inner_size();
                    app_state.resize(size.width, size.height);
                }
                self.init_flows();
                if let Some(app_state) = &self.state {
                    app_state.ctx.window.request_redraw();
                }
            }
            FlowEvent::Custom(custom_event) => {
                if let Some(state) = &mut self.state {
                    let result = self
                        .graphics_flows
                        .iter_mut()
                        .fold(Some(custom_event), |event, flow| {
                            flow.on_custom_events(&state.ctx, &mut state.state, event?)
                        });
                    if result.is_some() {
                        log::warn!("Custom event was not consumed this cycle");
                    }
                }
            }
            FlowEvent::Mut(fn_once) => {
                if let Some(state) = &mut self.state {
                    fn_once(&mut state.state);
                }
            }
            FlowEvent::Exit => {
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        self.graphics_flows.iter_mut().for_each(|f| {
            let events = f.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.state,
                &mut state.ctx,
                self.proxy.clone(),
                events,
            );
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::CursorMoved { position, .. } => {
                state.ctx.input.coords = position;
                self.update_hover();
            }
            WindowEvent::CursorLeft { .. } => self.set_hovered(None),
            WindowEvent::MouseWheel { delta, .. } => state.ctx.input.scroll(&delta),
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state) {
                (MouseButton::Left, ElementState::Pressed) => {
                    state.ctx.input.pressed = MouseButtonState::Left;
                    self.click();
                }
                (MouseButton::Right, ElementState::Pressed) => {
                    state.ctx.input.pressed = MouseButtonState::Right;
                }
                (_, ElementState::Released) => state.ctx.input.pressed = MouseButtonState::None,
                _ => (),
            },
            _ => {}
        }
    }
}

fn handle_flow_output<State, Event>(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    state: &mut State,
    ctx: &mut Context,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<State, Event>>,
    out: Out<State, Event>,
) {
    match out {
        // Send the events passed by the user to winit
        Out::FutEvent(futures) => {
            let fut =
                async move { futures::future::join_all(futures.into_iter().map(Pin::from)).await };
            #[cfg(not(target_arch = "wasm32"))]
            {
                let resolved = async_runtime.block_on(fut);
                for event in resolved {
                    if let Err(err) = proxy.send_event(FlowEvent::Custom(event)) {
                        log::error!("Event loop was closed before all events could be processed: {}", err);
                        break;
                    }
                }
            }

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    let resolved = fut.await;
                    for event in resolved {
                        if proxy.send_event(FlowEvent::Custom(event)).is_err() {
                            log::error!("Event loop was closed before all events could be processed");
                            break;
                        }
                    }
                });
            }
        }
        // Mutate the state if the arch supports blocking, create an event otherwise
        Out::FutFn(futures) => {
            let events: Vec<Pin<Box<dyn Future<Output = Box<dyn FnOnce(&mut State)>>>>> =
                futures.into_iter().map(Pin::from).collect();
            let fut = async move { futures::future::join_all(events.into_iter()).await };
            #[cfg(not(target_arch = "wasm32"))]
            {
                let resolved: Vec<Box<dyn FnOnce(&mut State)>> = async_runtime.block_on(fut);
                resolved.into_iter().for_each(|mutation| {
                    mutation(state);
                });
            }

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    let resolved = fut.await;
                    for mutation in resolved {
                        if proxy.send_event(FlowEvent::Mut(mutation)).is_err() {
                            log::error!("Event loop was closed before a state mutation arrived");
                            break;
                        }
                    }
                });
            }
        }
        Out::Configure(f) => f(ctx),
        Out::Empty => (),
    }
}

/// Open a window and run `constructors`' flows until the window closes.
pub fn run<State: 'static + Default, Event: 'static>(
    constructors: Vec<FlowConstructor<State, Event>>,
) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // a logger installed by the embedding page wins
        let _ = console_log::init_with_level(log::Level::Info);
    }

    let event_loop: EventLoop<FlowEvent<State, Event>> = EventLoop::with_user_event().build()?;

    let mut app: App<State, Event> = App::new(&event_loop, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
