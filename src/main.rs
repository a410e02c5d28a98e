use log::{error, info};

use pagemotion::app::{mount_host, MotionRoot};
use pagemotion::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::default_log_level()).expect("error initializing log");

    info!("Starting page motion");
    match mount_host() {
        Ok(host) => {
            yew::Renderer::<MotionRoot>::with_root(host).render();
        }
        Err(e) => error!("could not mount motion root: {}", e),
    }
}
