use std::cell::Cell;
use std::rc::Rc;

use gloo::console;
use gloo::dialogs::alert;
use gloo::events::EventListener;
use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, File, FormData, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, HtmlSelectElement,
};

use super::dom;
use super::embers::EmberOverlay;
use super::sound::SoundPlayer;
use crate::config::AppConfig;
use crate::costume::{self, Costume};
use crate::error::TransformError;
use crate::transform::{
    validate_display_name, validate_image, TransformRequest, TransformResponse, UploadResponse,
};

const IDLE_LABEL: &str = "¡Transformar y Animar!";
const BUSY_LABEL: &str = "Procesando...";

/// Hooks the transform button on the main page.
pub(crate) fn mount(document: &Document, config: AppConfig) -> Result<(), JsValue> {
    let button = dom::element::<HtmlButtonElement>(document, "transformButton")
        .ok_or("missing #transformButton")?;
    let embers = EmberOverlay::from_ids(
        document,
        "emberCanvas",
        "transformedImage",
        Some("emberToggleBtn"),
        config.effects,
    )?;
    let stage = Rc::new(Stage {
        file_input: dom::element(document, "userImage"),
        costume_select: dom::element(document, "disfrazSelector"),
        name_input: dom::element(document, "displayName"),
        prompt_input: dom::element(document, "extraPrompt"),
        thematic_input: dom::element(document, "useThematicBg"),
        loading: dom::element(document, "loadingMessage"),
        spinner: dom::element(document, "spinner"),
        ai_status: dom::element(document, "aiStatus"),
        result_image: dom::element(document, "transformedImage"),
        animation: dom::element(document, "halloweenAnimation"),
        image_stage: dom::query(document, ".image-stage"),
        theme_overlay: dom::element(document, "themeOverlay"),
        download_area: dom::element(document, "downloadArea"),
        download_link: dom::element(document, "downloadResultBtn"),
        brochure: dom::element(document, "brochureContainer"),
        ember_toggle: dom::element(document, "emberToggleBtn"),
        sound: SoundPlayer::from_ids(document, "halloweenSound", "playSoundBtn"),
        embers,
        busy: Cell::new(false),
        button: button.clone(),
        config,
    });

    EventListener::new(&button, "click", move |_| {
        let stage = Rc::clone(&stage);
        spawn_local(async move { stage.run().await });
    })
    .forget();
    Ok(())
}

struct StageInput {
    file: File,
    request: TransformRequest,
}

struct Stage {
    config: AppConfig,
    button: HtmlButtonElement,
    file_input: Option<HtmlInputElement>,
    costume_select: Option<HtmlSelectElement>,
    name_input: Option<HtmlInputElement>,
    prompt_input: Option<HtmlInputElement>,
    thematic_input: Option<HtmlInputElement>,
    loading: Option<HtmlElement>,
    spinner: Option<HtmlElement>,
    ai_status: Option<HtmlElement>,
    result_image: Option<HtmlImageElement>,
    animation: Option<HtmlElement>,
    image_stage: Option<HtmlElement>,
    theme_overlay: Option<HtmlElement>,
    download_area: Option<HtmlElement>,
    download_link: Option<HtmlAnchorElement>,
    brochure: Option<HtmlElement>,
    ember_toggle: Option<HtmlElement>,
    sound: Option<SoundPlayer>,
    embers: Option<EmberOverlay>,
    busy: Cell<bool>,
}

impl Stage {
    async fn run(self: Rc<Self>) {
        if self.busy.get() {
            return;
        }
        let input = match self.read_input() {
            Ok(input) => input,
            Err(err) => {
                alert(&err.to_string());
                if let (TransformError::NameTooShort { .. }, Some(name)) = (&err, &self.name_input) {
                    let _ = name.focus();
                }
                return;
            }
        };

        self.set_busy(true);
        match self.submit(&input).await {
            Ok(response) => self.present(&input.request, &response),
            Err(err) => console::error!("transformation failed", err.to_string()),
        }
        self.set_busy(false);
    }

    fn read_input(&self) -> Result<StageInput, TransformError> {
        let file = self
            .file_input
            .as_ref()
            .and_then(HtmlInputElement::files)
            .and_then(|files| files.get(0))
            .ok_or(TransformError::MissingImage)?;
        validate_image(&file.type_(), file.size() as u64)?;
        let display_name = validate_display_name(
            &self
                .name_input
                .as_ref()
                .map(HtmlInputElement::value)
                .unwrap_or_default(),
        )?;

        let request = TransformRequest {
            image_url: String::new(),
            costume: self
                .costume_select
                .as_ref()
                .map(HtmlSelectElement::value)
                .unwrap_or_default(),
            display_name,
            extra_prompt: self.prompt_input.as_ref().map(HtmlInputElement::value),
            use_thematic_bg: self.thematic_input.as_ref().map(HtmlInputElement::checked),
        };
        Ok(StageInput { file, request })
    }

    async fn submit(&self, input: &StageInput) -> Result<TransformResponse, TransformError> {
        let upload = FormData::new().map_err(js_failure)?;
        upload
            .append_with_blob("image", &input.file)
            .map_err(js_failure)?;
        let uploaded: UploadResponse =
            post_form(&self.config.upload_endpoint, upload, "Upload").await?;

        let request = TransformRequest {
            image_url: uploaded.into_image_url()?,
            ..input.request.clone()
        };
        let form = FormData::new().map_err(js_failure)?;
        for (name, value) in request.form_fields() {
            form.append_with_str(name, &value).map_err(js_failure)?;
        }
        post_form(&self.config.transform_endpoint, form, "Transform").await
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.button.set_disabled(busy);
        self.button
            .set_text_content(Some(if busy { BUSY_LABEL } else { IDLE_LABEL }));
        let shown = if busy { "block" } else { "none" };
        for element in [&self.loading, &self.spinner].into_iter().flatten() {
            dom::set_display(element, shown);
        }
        if busy {
            if let Some(status) = &self.ai_status {
                dom::hide(status);
                status.set_text_content(None);
            }
            for element in [&self.animation, &self.theme_overlay].into_iter().flatten() {
                dom::hide(element);
            }
        }
    }

    fn present(&self, request: &TransformRequest, response: &TransformResponse) {
        let src = response.image_src();
        if let Some(image) = &self.result_image {
            if let Some(src) = src {
                image.set_src(src);
            }
            dom::set_display(image, "block");
        }
        if let Some(stage) = &self.image_stage {
            dom::set_display(stage, "inline-block");
        }

        if let (Some(src), Some(area), Some(link)) = (src, &self.download_area, &self.download_link)
        {
            link.set_href(src);
            link.set_download(&response.download_filename(&request.display_name));
            dom::set_display(area, "block");
        }

        if let Some(sound) = &self.sound {
            let path = Costume::from_tag(&request.costume)
                .map(|costume| self.config.sound_path(&costume.sound_file()));
            sound.play_source(path.as_deref());
        }

        if let Some(brochure) = &self.brochure {
            let lines = response.narrative_lines(&request.costume, &request.display_name);
            brochure.set_inner_html(&costume::brochure_markup(
                &request.costume,
                &request.display_name,
                src.unwrap_or_default(),
                &lines,
            ));
            dom::set_display(brochure, "block");
        }

        // A new result starts with the overlay off.
        if let Some(embers) = &self.embers {
            embers.stop();
            if let Some(toggle) = &self.ember_toggle {
                dom::set_display(toggle, "inline-block");
            }
        }

        if let (Some(status), Some(line)) = (&self.ai_status, response.status_line()) {
            status.set_text_content(Some(&line));
            dom::set_display(status, "block");
        }
    }
}

async fn post_form<T: DeserializeOwned>(
    url: &str,
    form: FormData,
    stage: &'static str,
) -> Result<T, TransformError> {
    let response = Request::post(url)
        .body(form)
        .map_err(|err| TransformError::Transport(err.to_string()))?
        .send()
        .await
        .map_err(|err| TransformError::Transport(err.to_string()))?;
    if !response.ok() {
        return Err(TransformError::Http {
            stage,
            status: response.status(),
        });
    }
    let body = response
        .text()
        .await
        .map_err(|err| TransformError::Transport(err.to_string()))?;
    serde_json::from_str(&body).map_err(|err| TransformError::Decode(err.to_string()))
}

fn js_failure(err: JsValue) -> TransformError {
    TransformError::Transport(format!("{err:?}"))
}
