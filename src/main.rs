fn main() {
    env_logger::init();
    octorelease::app::cli::run();
}
