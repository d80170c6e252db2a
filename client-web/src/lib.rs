#![recursion_limit="512"]


// Use `wee_alloc` as the global allocator.
//#[global_allocator]
//static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

use client_common::ModalConfig;
use common::consts::{CHANGE_URL_ATTRIBUTE, MODAL_ELEMENT_ID, MOUNT_ROOT_ID, VALIDATE_URL_ATTRIBUTE};
use eyre::{WrapErr, eyre};
use tracing::{debug, info};
use url::Url;
use yew::web_sys::{Document, Element};

pub mod password_modal;

pub use password_modal::{PasswordModal, Props};

/// Reads the endpoints from `#passwordModal` and mounts the modal, trigger button included,
/// into `#passwordModalRoot`, created right after it when the page has none.
/// Pages without `#passwordModal` are left alone.
pub fn start() -> eyre::Result<()> {
    let document = yew::utils::document();

    let element = match document.get_element_by_id(MODAL_ELEMENT_ID) {
        Some(e) => e,
        None => {
            debug!("no #{} on this page, nothing to do", MODAL_ELEMENT_ID);
            return Ok(());
        }
    };

    let page_url = document.url().map_err(|e| eyre!("failed to get the page url: {:?}", e))?;
    let config = config_from(
        &page_url,
        element.get_attribute(VALIDATE_URL_ATTRIBUTE),
        element.get_attribute(CHANGE_URL_ATTRIBUTE),
    )?;
    info!(?config, "mounting password modal");

    let root = mount_root(&document, &element)?;
    yew::App::<PasswordModal>::new().mount_with_props(root, Props { config });
    Ok(())
}

fn config_from(page_url: &str, validate_url: Option<String>, change_url: Option<String>) -> eyre::Result<ModalConfig> {
    let base = Url::parse(page_url).wrap_err("invalid page url")?;
    ModalConfig::from_attributes(
        &base,
        &validate_url.unwrap_or_default(),
        &change_url.unwrap_or_default(),
    )
}

fn mount_root(document: &Document, anchor: &Element) -> eyre::Result<Element> {
    if let Some(root) = document.get_element_by_id(MOUNT_ROOT_ID) {
        return Ok(root);
    }

    let root = document.create_element("div")
        .map_err(|e| eyre!("failed to create #{}: {:?}", MOUNT_ROOT_ID, e))?;
    root.set_id(MOUNT_ROOT_ID);
    let parent = anchor.parent_node()
        .ok_or_else(|| eyre!("#{} is not attached to the page", MODAL_ELEMENT_ID))?;
    parent.insert_before(&root, anchor.next_sibling().as_ref())
        .map_err(|e| eyre!("failed to insert #{}: {:?}", MOUNT_ROOT_ID, e))?;
    Ok(root)
}
