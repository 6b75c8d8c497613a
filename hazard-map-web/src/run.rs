use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hazard_map::async_runtime::spawn;
use hazard_map::control::{MouseButton, RawUserEvent};
use hazard_map::hazard_map_types::Point2d;
use hazard_map::platform::PlatformServiceImpl;
use hazard_map::upload::{SelectedFile, UploadForm};
use hazard_map::{
    HazardDataLoader, HazardKind, HazardMapApp, HazardMapConfig, MapEventHandler, Messenger,
};
use js_sys::Uint8Array;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlInputElement,
    HtmlSelectElement, KeyboardEvent, WheelEvent, Window,
};

use crate::canvas::WebCanvas;
use crate::dom::{self, DomView};

type App = HazardMapApp<DomView>;

// Number of wheel delta pixels counted as one scroll line.
const PIXELS_PER_LINE: f64 = 100.0;

/// Requests a frame from the browser. Several requests before the frame is drawn result in one frame.
#[derive(Clone, Default)]
struct FrameMessenger {
    pending: Rc<Cell<bool>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Messenger for FrameMessenger {
    fn request_redraw(&self) {
        if self.pending.replace(true) {
            return;
        }

        let frame = self.frame.borrow();
        let (Some(window), Some(callback)) = (web_sys::window(), frame.as_ref()) else {
            self.pending.set(false);
            return;
        };

        if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log::warn!("Failed to request animation frame: {err:?}");
            self.pending.set(false);
        }
    }
}

/// Starts the hazard map on the current page.
///
/// `config` is an optional JSON document with [`HazardMapConfig`] fields. The hazard layers and the dataset list are
/// loaded in the background.
#[wasm_bindgen]
pub fn init(config: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Fails only if the host page has already set a logger.
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config {
        Some(json) => HazardMapConfig::from_json(&json).map_err(|err| err.to_string())?,
        None => HazardMapConfig::default(),
    };

    let window = web_sys::window().ok_or("no global `window` exists")?;
    let document = window.document().ok_or("window has no document")?;

    let canvas_element: HtmlCanvasElement =
        dom::element(&document, dom::MAP_CANVAS).ok_or("map canvas is not found")?;
    let context: CanvasRenderingContext2d = canvas_element
        .get_context("2d")?
        .ok_or("2d context is not available")?
        .dyn_into()?;
    let canvas = Rc::new(RefCell::new(WebCanvas::new(
        canvas_element.clone(),
        context,
    )));

    let messenger = FrameMessenger::default();
    let view = DomView::new(window.clone(), document.clone());
    let app = Rc::new(RefCell::new(App::new(
        config.clone(),
        view,
        Some(Box::new(messenger.clone())),
    )));

    {
        let app = app.clone();
        let canvas = canvas.clone();
        let pending = messenger.pending.clone();
        *messenger.frame.borrow_mut() = Some(Closure::new(move || {
            pending.set(false);
            match app.try_borrow_mut() {
                Ok(mut app) => app.render(&mut *canvas.borrow_mut()),
                Err(_) => log::debug!("Frame skipped, the map is busy"),
            }
        }));
    }

    let size = canvas.borrow().fit_to_element();
    app.borrow_mut().resize(size);

    bind_map_events(&window, &canvas_element, &app)?;
    bind_resize(&window, &canvas, &app)?;
    bind_toggles(&document, &app)?;
    bind_upload(&document, &app)?;
    bind_search(&document, &app)?;

    load_data(config, app);

    log::info!("Hazard map is initialized");
    Ok(())
}

fn load_data(config: HazardMapConfig, app: Rc<RefCell<App>>) {
    spawn(async move {
        let loader = HazardDataLoader::new(PlatformServiceImpl::new(), &config);
        let summary = loader
            .load_all(|kind, result| app.borrow_mut().apply_dataset(kind, result))
            .await;
        log::info!(
            "Hazard layers loaded: {}, failed: {}",
            summary.loaded.len(),
            summary.failed.len()
        );

        let datasets = loader.load_datasets().await;
        app.borrow_mut().apply_datasets(datasets);
    });
}

fn listen<E: FromWasmAbi + 'static>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn mouse_button(button: i16) -> MouseButton {
    match button {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Other,
    }
}

fn bind_map_events(
    window: &Window,
    canvas: &HtmlCanvasElement,
    app: &Rc<RefCell<App>>,
) -> Result<(), JsValue> {
    let handle = {
        let app = app.clone();
        move |event: RawUserEvent| app.borrow_mut().handle_raw_event(event)
    };

    let on_move = handle.clone();
    listen(canvas, "mousemove", move |e: web_sys::MouseEvent| {
        on_move(RawUserEvent::PointerMoved(Point2d::new(
            e.offset_x() as f64,
            e.offset_y() as f64,
        )))
    })?;

    let on_down = handle.clone();
    listen(canvas, "mousedown", move |e: web_sys::MouseEvent| {
        on_down(RawUserEvent::ButtonPressed(mouse_button(e.button())))
    })?;

    // A drag can end outside of the canvas.
    let on_up = handle.clone();
    listen(window, "mouseup", move |e: web_sys::MouseEvent| {
        on_up(RawUserEvent::ButtonReleased(mouse_button(e.button())))
    })?;

    listen(canvas, "wheel", move |e: WheelEvent| {
        e.prevent_default();
        handle(RawUserEvent::Scroll(e.delta_y() / PIXELS_PER_LINE))
    })?;

    Ok(())
}

fn bind_resize(
    window: &Window,
    canvas: &Rc<RefCell<WebCanvas>>,
    app: &Rc<RefCell<App>>,
) -> Result<(), JsValue> {
    let canvas = canvas.clone();
    let app = app.clone();
    listen(window, "resize", move |_: web_sys::Event| {
        let size = canvas.borrow().fit_to_element();
        app.borrow_mut().resize(size);
    })
}

fn bind_toggles(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    for kind in HazardKind::ALL {
        let Some(input) = dom::element::<HtmlInputElement>(document, &dom::toggle_id(kind)) else {
            continue;
        };

        let app = app.clone();
        let target = input.clone();
        listen(&input, "change", move |_: web_sys::Event| {
            app.borrow_mut().on_toggle_change(kind, target.checked());
        })?;
    }

    Ok(())
}

async fn selected_file(input: &HtmlInputElement) -> Result<Option<SelectedFile>, JsValue> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer()).await?;
    let data = Uint8Array::new(&buffer).to_vec();
    Ok(Some(SelectedFile::new(file.name(), data)))
}

fn bind_upload(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    if let Some(form) = dom::element::<EventTarget>(document, dom::UPLOAD_FORM) {
        let file_input = dom::element::<HtmlInputElement>(document, dom::SHAPEFILE_INPUT);
        let type_select = dom::element::<HtmlSelectElement>(document, dom::DATASET_TYPE);
        let app = app.clone();

        listen(&form, "submit", move |e: web_sys::Event| {
            e.prevent_default();

            let file_input = file_input.clone();
            let dataset_type = type_select.as_ref().map(|select| select.value());
            let app = app.clone();

            spawn(async move {
                let file = match &file_input {
                    Some(input) => match selected_file(input).await {
                        Ok(file) => file,
                        Err(err) => {
                            log::warn!("Failed to read the selected file: {err:?}");
                            None
                        }
                    },
                    None => None,
                };

                let pending = app
                    .borrow_mut()
                    .on_form_submit(UploadForm { file, dataset_type });
                let Some(pending) = pending else {
                    return;
                };

                let result = pending.send(&PlatformServiceImpl::new()).await;
                app.borrow_mut().on_upload_finished(result);
            });
        })?;
    }

    if let Some(button) = dom::element::<EventTarget>(document, dom::UPLOAD_DISMISS) {
        let app = app.clone();
        listen(&button, "click", move |_: web_sys::Event| {
            app.borrow_mut().on_upload_dismiss();
        })?;
    }

    Ok(())
}

fn bind_search(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let Some(input) = dom::element::<HtmlInputElement>(document, dom::SEARCH_INPUT) else {
        return Ok(());
    };

    let run_search = {
        let app = app.clone();
        let input = input.clone();
        move || app.borrow_mut().on_search(&input.value())
    };

    if let Some(button) = dom::element::<EventTarget>(document, dom::SEARCH_BUTTON) {
        let run_search = run_search.clone();
        listen(&button, "click", move |_: web_sys::Event| run_search())?;
    }

    listen(&input, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            run_search();
        }
    })
}
