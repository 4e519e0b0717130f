use foldgrid::{FlowConstructor, flow};

#[derive(Default)]
struct GalleryState {
    _opened: u32,
}

enum GalleryEvent {}

#[test]
fn host_accepts_default_state() {
    let run: fn(Vec<FlowConstructor<GalleryState, GalleryEvent>>) -> anyhow::Result<()> = flow::run;
    // only instantiated, opening a window needs a display
    let _ = run;
}
