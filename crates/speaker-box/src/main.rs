fn main() {
    env_logger::init();
    log::info!("starting speaker-box");
    speaker_render::run();
}
