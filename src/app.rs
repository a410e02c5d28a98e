use log::{error, info};
use web_sys::Element;
use yew::prelude::*;

use crate::dom;
use crate::error::MotionError;
use crate::page::Page;

/// Invisible root component: installs the motion layer on mount and tears
/// it down on unmount.
#[function_component(MotionRoot)]
pub fn motion_root() -> Html {
    use_effect_with_deps(
        move |_| {
            let page = match Page::install() {
                Ok(page) => Some(page),
                Err(e) => {
                    error!("page motion unavailable: {}", e);
                    None
                }
            };
            move || {
                if page.is_some() {
                    info!("detaching page motion");
                }
                drop(page);
            }
        },
        (), // run once on mount
    );

    html! {}
}

/// Hidden element appended to `<body>` for the component to live in, so
/// the static page markup is left alone.
pub fn mount_host() -> Result<Element, MotionError> {
    let document = dom::document()?;
    let body = document.body().ok_or(MotionError::Unavailable("body"))?;
    let host = document.create_element("div")?;
    host.set_attribute("hidden", "")?;
    host.set_attribute("data-motion-root", "")?;
    body.append_child(&host)?;
    Ok(host)
}
