use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub mod render;

pub use render::{RenderRequest, RenderResponse, DEFAULT_RENDER_PROMPT, RENDER_FILE_NAME};

/// Уникальный идентификатор объекта в сцене
pub type ObjectId = String;

/// Цвет в sRGB
pub type Color = [u8; 3];

pub const WHITE: Color = [0xff, 0xff, 0xff];
/// Цвет деталей из каталога
pub const LIGHT_GRAY: Color = [0xcc, 0xcc, 0xcc];
/// Цвет загруженных мешей
pub const GRAY: Color = [0x88, 0x88, 0x88];

/// Сгенерировать идентификатор: метка времени (мс) + случайный суффикс.
///
/// Уникальность не криптографическая, но коллизии маловероятны.
pub fn generate_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}{millis}-{}", &suffix[..8])
}

/// Тип примитива
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    #[default]
    Box,
    Sphere,
    Cylinder,
}

impl GeometryType {
    pub fn all() -> &'static [GeometryType] {
        &[GeometryType::Box, GeometryType::Sphere, GeometryType::Cylinder]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GeometryType::Box => "Box",
            GeometryType::Sphere => "Sphere",
            GeometryType::Cylinder => "Cylinder",
        }
    }
}

/// Локатор загруженного ресурса (`asset://<n>/<file>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetLocator(pub String);

impl AssetLocator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Источник геометрии объекта.
///
/// Ровно один вариант авторитетен: примитив или загруженный файл.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectSource {
    Primitive { geometry: GeometryType },
    Uploaded { locator: AssetLocator },
}

impl Default for ObjectSource {
    fn default() -> Self {
        ObjectSource::Primitive {
            geometry: GeometryType::default(),
        }
    }
}

impl ObjectSource {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, ObjectSource::Uploaded { .. })
    }
}

/// Трансформация объекта (вращение — углы Эйлера XYZ в радианах)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Объект сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub source: ObjectSource,
    pub transform: Transform,
    pub color: Color,
}

/// Частичное описание нового объекта; незаданные поля получают значения по умолчанию
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDraft {
    pub name: Option<String>,
    pub source: Option<ObjectSource>,
    pub position: Option<[f64; 3]>,
    pub rotation: Option<[f64; 3]>,
    pub scale: Option<[f64; 3]>,
    pub color: Option<Color>,
}

impl ObjectDraft {
    pub fn primitive(name: impl Into<String>, geometry: GeometryType) -> Self {
        Self {
            name: Some(name.into()),
            source: Some(ObjectSource::Primitive { geometry }),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Заполнить пропуски значениями по умолчанию
    pub fn into_object(self, id: ObjectId) -> SceneObject {
        let defaults = Transform::new();
        SceneObject {
            id,
            name: self.name.unwrap_or_else(|| "New Object".to_string()),
            source: self.source.unwrap_or_default(),
            transform: Transform {
                position: self.position.unwrap_or(defaults.position),
                rotation: self.rotation.unwrap_or(defaults.rotation),
                scale: self.scale.unwrap_or(defaults.scale),
            },
            color: self.color.unwrap_or(WHITE),
        }
    }
}

/// Частичное обновление объекта; применяются только заданные поля
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub position: Option<[f64; 3]>,
    pub rotation: Option<[f64; 3]>,
    pub scale: Option<[f64; 3]>,
    pub color: Option<Color>,
}

impl ObjectPatch {
    /// Полная запись трансформации (используется гизмо)
    pub fn transform(transform: &Transform) -> Self {
        Self {
            position: Some(transform.position),
            rotation: Some(transform.rotation),
            scale: Some(transform.scale),
            ..Self::default()
        }
    }

    pub fn apply_to(self, object: &mut SceneObject) {
        if let Some(name) = self.name {
            object.name = name;
        }
        if let Some(position) = self.position {
            object.transform.position = position;
        }
        if let Some(rotation) = self.rotation {
            object.transform.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            object.transform.scale = scale;
        }
        if let Some(color) = self.color {
            object.color = color;
        }
    }
}

/// Измерение расстояния между двумя точками сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: String,
    pub start: [f64; 3],
    pub end: [f64; 3],
    /// Евклидово расстояние, вычисляется при создании
    pub distance: f64,
}

impl Measurement {
    pub fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        let distance = euclidean_distance(start, end);
        Self {
            id: generate_id("m-"),
            start,
            end,
            distance,
        }
    }

    pub fn midpoint(&self) -> [f64; 3] {
        [
            (self.start[0] + self.end[0]) * 0.5,
            (self.start[1] + self.end[1]) * 0.5,
            (self.start[2] + self.end[2]) * 0.5,
        ]
    }
}

pub fn euclidean_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Настройки водяного знака
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    pub enabled: bool,
    pub text: String,
    opacity: f32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            text: "© Studio".to_string(),
            opacity: 0.5,
        }
    }
}

impl WatermarkConfig {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Установить прозрачность, ограничивая диапазоном [0, 1]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
    }

    /// Текст для запроса рендера (только если включён и не пуст)
    pub fn request_text(&self) -> Option<String> {
        let text = self.text.trim();
        (self.enabled && !text.is_empty()).then(|| text.to_string())
    }
}

/// Режим инструмента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    Move,
    Rotate,
    Scale,
    Measure,
}

impl ToolMode {
    pub fn all() -> &'static [ToolMode] {
        &[
            ToolMode::Select,
            ToolMode::Move,
            ToolMode::Rotate,
            ToolMode::Scale,
            ToolMode::Measure,
        ]
    }

    /// Режимы, в которых к выделенному объекту привязано гизмо
    pub fn is_transform(&self) -> bool {
        matches!(self, ToolMode::Move | ToolMode::Rotate | ToolMode::Scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_distinct() {
        let a = generate_id("");
        let b = generate_id("");
        assert_ne!(a, b);
    }

    #[test]
    fn test_draft_defaults() {
        let obj = ObjectDraft::default().into_object("x".to_string());
        assert_eq!(obj.name, "New Object");
        assert_eq!(
            obj.source,
            ObjectSource::Primitive {
                geometry: GeometryType::Box
            }
        );
        assert_eq!(obj.transform, Transform::new());
        assert_eq!(obj.color, WHITE);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut obj = ObjectDraft::primitive("Ball", GeometryType::Sphere).into_object("a".into());
        let before = obj.clone();
        ObjectPatch {
            position: Some([1.0, 2.0, 3.0]),
            ..Default::default()
        }
        .apply_to(&mut obj);
        assert_eq!(obj.transform.position, [1.0, 2.0, 3.0]);
        assert_eq!(obj.transform.rotation, before.transform.rotation);
        assert_eq!(obj.transform.scale, before.transform.scale);
        assert_eq!(obj.name, before.name);
        assert_eq!(obj.color, before.color);
    }

    #[test]
    fn test_measurement_distance_symmetric() {
        let p = [1.0, -2.0, 0.5];
        let q = [4.0, 2.0, 0.5];
        let a = Measurement::new(p, q);
        let b = Measurement::new(q, p);
        assert!((a.distance - 5.0).abs() < 1e-12);
        assert!((a.distance - b.distance).abs() < 1e-12);
    }

    #[test]
    fn test_watermark_opacity_clamped() {
        let mut w = WatermarkConfig::default();
        w.set_opacity(1.7);
        assert_eq!(w.opacity(), 1.0);
        w.set_opacity(-0.2);
        assert_eq!(w.opacity(), 0.0);
    }

    #[test]
    fn test_watermark_request_text() {
        let mut w = WatermarkConfig::default();
        assert_eq!(w.request_text(), None);
        w.enabled = true;
        assert_eq!(w.request_text().as_deref(), Some("© Studio"));
        w.text = "   ".to_string();
        assert_eq!(w.request_text(), None);
    }

    #[test]
    fn test_object_source_serde_tag() {
        let src = ObjectSource::Uploaded {
            locator: AssetLocator("asset://1/chair.glb".into()),
        };
        let json = serde_json::to_string(&src).unwrap();
        assert!(json.contains("\"kind\":\"uploaded\""));
        let back: ObjectSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, src);
    }
}
