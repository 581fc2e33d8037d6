use serde::{Deserialize, Serialize};

/// Инструкция по умолчанию для сервиса генерации изображений
pub const DEFAULT_RENDER_PROMPT: &str = "Turn this 3D scene screenshot into a professional studio \
product photo: soft diffuse lighting, subtle reflections on a clean seamless backdrop. Keep every \
object's shape, proportions, colors and arrangement exactly as shown.";

/// Имя файла по умолчанию при сохранении результата
pub const RENDER_FILE_NAME: &str = "studio-render.png";

/// Запрос на рендер от клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// PNG-снимок вьюпорта в base64
    pub image_png_base64: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

impl RenderRequest {
    /// Итоговая инструкция для генератора с учётом водяного знака
    pub fn instruction(&self) -> String {
        match &self.watermark {
            Some(text) => format!(
                "{}\nAdd a small, unobtrusive watermark reading \"{}\" in the bottom-right corner.",
                self.prompt, text
            ),
            None => self.prompt.clone(),
        }
    }
}

/// Ответ сервиса рендера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub image_base64: String,
    #[serde(default = "default_mime")]
    pub mime_type: String,
}

fn default_mime() -> String {
    "image/png".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_without_watermark() {
        let req = RenderRequest {
            image_png_base64: String::new(),
            prompt: "p".into(),
            watermark: None,
        };
        assert_eq!(req.instruction(), "p");
    }

    #[test]
    fn test_instruction_with_watermark() {
        let req = RenderRequest {
            image_png_base64: String::new(),
            prompt: "p".into(),
            watermark: Some("ACME".into()),
        };
        assert!(req.instruction().starts_with("p\n"));
        assert!(req.instruction().contains("\"ACME\""));
    }

    #[test]
    fn test_response_default_mime() {
        let resp: RenderResponse = serde_json::from_str(r#"{"image_base64":"AAAA"}"#).unwrap();
        assert_eq!(resp.mime_type, "image/png");
    }
}
