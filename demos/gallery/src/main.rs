use foldgrid::{
    AnimationDriver, DriverConfig, FrameInput, GraphicsFlow, GridLayout, ImagePair, Out, Trigger,
    camera::Ray,
    cgmath::{Matrix4, Vector3},
    compose,
    context::{Context, InitContext},
    data_structures::plane::{CardDeck, CardGrid},
    deform::FoldVariant,
    flow::FlowConstructor,
    pick::Hit,
    render::Render,
    winit::{
        event::{ElementState, KeyEvent, WindowEvent},
        keyboard::{Key, NamedKey},
    },
};

const CARD_COUNT: usize = 20;
const GRID_COUNT: usize = 100;

/// Looked up under `./assets`. Missing files show a checkerboard.
const IMAGE_PAIRS: [(&str, &str); 7] = [
    ("cards/01-front.jpg", "cards/01-back.jpg"),
    ("cards/02-front.jpg", "cards/02-back.jpg"),
    ("cards/03-front.jpg", "cards/03-back.jpg"),
    ("cards/04-front.jpg", "cards/04-back.jpg"),
    ("cards/05-front.jpg", "cards/05-back.jpg"),
    ("cards/06-front.jpg", "cards/06-back.jpg"),
    ("cards/07-front.jpg", "cards/07-back.jpg"),
];

fn image_pairs() -> Vec<ImagePair> {
    IMAGE_PAIRS
        .iter()
        .map(|(front, back)| ImagePair::new(*front, *back))
        .collect()
}

#[derive(Default)]
struct State;

enum Event {}

/// Single cards: hover to peek, click to open, Escape to close everything.
struct Gallery {
    deck: CardDeck,
    driver: AnimationDriver,
}

impl Gallery {
    async fn new(ctx: InitContext) -> Self {
        let entities = compose(&image_pairs(), CARD_COUNT, &GridLayout::cards());
        let mut driver = AnimationDriver::new(DriverConfig::default());
        entities.iter().for_each(|entity| driver.register(entity.id()));
        let deck = CardDeck::load(&ctx, entities).await;
        Self { deck, driver }
    }

    fn release_all(&mut self) {
        let held: Vec<u32> = self.driver.ids().filter(|id| self.driver.is_held(*id)).collect();
        log::info!("Releasing {} cards", held.len());
        for id in held {
            self.driver.trigger(id, Trigger::Release);
        }
    }
}

impl GraphicsFlow<State, Event> for Gallery {
    fn on_init(&mut self, _: &mut Context, _: &mut State) -> Out<State, Event> {
        Out::Empty
    }

    fn on_click(&mut self, _: &Context, _: &mut State, id: u32) -> Out<State, Event> {
        self.driver.trigger(id, Trigger::Click);
        Out::Empty
    }

    fn on_hover(&mut self, _: &Context, _: &mut State, id: u32, entered: bool) -> Out<State, Event> {
        let trigger = if entered {
            Trigger::HoverEnter
        } else {
            Trigger::HoverLeave
        };
        self.driver.trigger(id, trigger);
        Out::Empty
    }

    fn on_update(
        &mut self,
        ctx: &Context,
        _: &mut State,
        frame: &FrameInput,
        dt: std::time::Duration,
    ) -> Out<State, Event> {
        self.driver.tick(dt.as_secs_f32());
        let driver = &self.driver;
        self.deck.update(frame, |id| driver.progress(id));
        self.deck.write_to_buffers(&ctx.queue);
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut State, event: &WindowEvent) -> Out<State, Event> {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Named(NamedKey::Escape),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = event
        {
            self.release_all();
        }
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.deck.render()
    }

    fn pick(&self, ctx: &Context, ray: &Ray) -> Option<Hit> {
        self.deck.pick(ray, &ctx.fold.single)
    }
}

/// Instanced cards behind the gallery, folded by scrolling through the first
/// page.
struct ScrollGrid {
    grid: CardGrid,
}

impl ScrollGrid {
    async fn new(ctx: InitContext, variant: FoldVariant, count: usize) -> Self {
        let mut grid = CardGrid::load(&ctx, 1000, variant, count, &GridLayout::instances(), &image_pairs()).await;
        grid.model = Matrix4::from_translation(Vector3::new(0.0, 0.0, -6.0));
        Self { grid }
    }
}

impl GraphicsFlow<State, Event> for ScrollGrid {
    fn on_init(&mut self, _: &mut Context, _: &mut State) -> Out<State, Event> {
        Out::Empty
    }

    fn on_update(
        &mut self,
        ctx: &Context,
        _: &mut State,
        frame: &FrameInput,
        _: std::time::Duration,
    ) -> Out<State, Event> {
        self.grid.update(frame, frame.scroll_range(0.0, 1.0 / 3.0));
        self.grid.write_to_buffer(&ctx.queue);
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.grid.render()
    }
}

fn main() {
    // `gallery grid` and `gallery strip` add a scroll-driven instanced grid behind the cards
    let backdrop = std::env::args().nth(1).and_then(|arg| match arg.as_str() {
        "grid" => Some((FoldVariant::Instanced, GRID_COUNT)),
        "strip" => Some((FoldVariant::Strip, IMAGE_PAIRS.len())),
        _ => None,
    });

    let gallery: FlowConstructor<State, Event> = Box::new(|ctx| {
        Box::pin(async move { Box::new(Gallery::new(ctx).await) as Box<dyn GraphicsFlow<_, _>> })
    });
    let mut flows = vec![gallery];
    if let Some((variant, count)) = backdrop {
        let grid: FlowConstructor<State, Event> = Box::new(move |ctx| {
            Box::pin(async move {
                Box::new(ScrollGrid::new(ctx, variant, count).await) as Box<dyn GraphicsFlow<_, _>>
            })
        });
        flows.push(grid);
    }

    if let Err(e) = foldgrid::run(flows) {
        log::error!("{}", e);
    }
}
