use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

use super::AppState;
use crate::brief::ShootBrief;
use crate::models::{GenerationMode, GenerationRequest, GenerationResult};

const IMAGE_ALT_FALLBACK: &str = "Згенероване зображення на основі брифу";

/// One labelled input of the brief form.
struct FieldMeta {
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    textarea: bool,
}

struct SectionMeta {
    legend: &'static str,
    fields: &'static [FieldMeta],
}

const fn field(id: &'static str, label: &'static str, placeholder: &'static str) -> FieldMeta {
    FieldMeta {
        id,
        label,
        placeholder,
        textarea: false,
    }
}

const fn area(id: &'static str, label: &'static str, placeholder: &'static str) -> FieldMeta {
    FieldMeta {
        id,
        label,
        placeholder,
        textarea: true,
    }
}

const SECTIONS: &[SectionMeta] = &[
    SectionMeta {
        legend: "1. Загальний Огляд",
        fields: &[
            field("projectType", "Тип Проєкту", "Напр., Подкаст, Реклама, Туторіал"),
            field(
                "videoTheme",
                "Тема/Концепція Відео",
                "Напр., Професійна, Художня, Гумористична",
            ),
            field("videoTone", "Тон Відео", "Напр., Бадьорий, Серйозний, Навчальний"),
        ],
    },
    SectionMeta {
        legend: "2. Візуальний Стиль",
        fields: &[
            field("colorPalette", "Палітра Кольорів", "Напр., Яскраві, Приглушені, Брендові"),
            field(
                "lightingStyle",
                "Стиль Освітлення",
                "Напр., Світле, Драматичні тіні, Природне",
            ),
            field("cameraAngles", "Ракурси Камери", "Напр., Крупні плани, Широкі, Зверху"),
            field(
                "composition",
                "Композиція/Кадрування",
                "Напр., Правило третин, По центру, Повний зріст",
            ),
            field(
                "moodAtmosphere",
                "Настрій/Атмосфера",
                "Напр., Енергійний, Спокійний, Ностальгічний",
            ),
            field("cameraMovement", "Рух Камери", "Напр., Плавний, Ручна камера, Статичний"),
        ],
    },
    SectionMeta {
        legend: "3. Локація та Фон",
        fields: &[
            area(
                "settingDetails",
                "Деталі Локації",
                "Напр., Мінімалістичний інтер'єр, Природа, Індастріал",
            ),
            area("backgrounds", "Фон/Оточення", "Напр., Однотонний фон, Місто, Офіс"),
        ],
    },
    SectionMeta {
        legend: "4. Учасники та Стилізація",
        fields: &[
            field("participants", "Учасники", "Напр., Актори, Ведучі, Моделі, Тварини"),
            field("wardrobe", "Гардероб", "Напр., Діловий, Кежуал, Брендований одяг"),
            field("hairMakeup", "Зачіска та Макіяж", "Напр., Натуральний, Вечірній, Вінтаж"),
        ],
    },
];

pub(crate) struct FieldView {
    pub(crate) id: &'static str,
    pub(crate) label: &'static str,
    pub(crate) placeholder: &'static str,
    pub(crate) textarea: bool,
    pub(crate) value: String,
}

pub(crate) struct SectionView {
    pub(crate) legend: &'static str,
    pub(crate) fields: Vec<FieldView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "visualizer.html")]
pub(crate) struct VisualizerTemplate {
    pub(crate) main_prompt: String,
    pub(crate) sections: Vec<SectionView>,
    pub(crate) submit_label: &'static str,
    pub(crate) loading_label: &'static str,
    pub(crate) error: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) image_alt: String,
    pub(crate) frame_text: Option<String>,
}

impl VisualizerTemplate {
    fn for_brief(brief: &ShootBrief, mode: GenerationMode) -> Self {
        let sections = SECTIONS
            .iter()
            .map(|section| SectionView {
                legend: section.legend,
                fields: section
                    .fields
                    .iter()
                    .map(|meta| FieldView {
                        id: meta.id,
                        label: meta.label,
                        placeholder: meta.placeholder,
                        textarea: meta.textarea,
                        value: brief.detail(meta.id).to_string(),
                    })
                    .collect(),
            })
            .collect();

        let (submit_label, loading_label) = match mode {
            GenerationMode::Image => ("Згенерувати Зображення", "Генерація Зображення..."),
            GenerationMode::Text => ("Згенерувати Опис Кадру", "Генерація Опису..."),
        };

        let alt = brief.main_prompt.trim();

        Self {
            main_prompt: brief.main_prompt.clone(),
            sections,
            submit_label,
            loading_label,
            error: None,
            image_url: None,
            image_alt: if alt.is_empty() {
                IMAGE_ALT_FALLBACK.to_string()
            } else {
                alt.to_string()
            },
            frame_text: None,
        }
    }
}

/// handles GET / and GET /visualizer
pub(crate) async fn visualizer_handler(State(state): State<AppState>) -> Response {
    VisualizerTemplate::for_brief(&ShootBrief::default(), state.gateway.default_mode())
        .into_response()
}

/// handles POST /visualizer
pub(crate) async fn visualizer_submit_handler(
    State(state): State<AppState>,
    Form(brief): Form<ShootBrief>,
) -> Response {
    let mut page = VisualizerTemplate::for_brief(&brief, state.gateway.default_mode());

    if let Err(err) = state.validator.validate(&brief.main_prompt) {
        info!(error = %err, "Brief rejected by validation");
        page.error = Some(err.to_string());
        return page.into_response();
    }

    let prompt = brief.prompt();
    debug!(prompt = %prompt, "Generated prompt");

    match state.gateway.generate(GenerationRequest::new(prompt)).await {
        Ok(GenerationResult::Image { image_url }) => page.image_url = Some(image_url),
        Ok(GenerationResult::Text { result }) => page.frame_text = Some(result),
        Err(err) => page.error = Some(err.message),
    }

    page.into_response()
}
