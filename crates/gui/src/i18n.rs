use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new" => if ru { "Новая сцена" } else { "New scene" },
        "menu.upload" => if ru { "Загрузить модель..." } else { "Upload mesh..." },
        "menu.upload_title" => if ru { "Загрузить 3D-модель" } else { "Upload 3D model" },
        "menu.set_bg" => if ru { "Фон из изображения..." } else { "Background image..." },
        "menu.set_bg_title" => if ru { "Изображение фона" } else { "Background image" },
        "menu.clear_bg" => if ru { "Убрать изображение фона" } else { "Clear background image" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.assets" => if ru { "Каталог" } else { "Asset panel" },
        "menu.properties" => if ru { "Свойства" } else { "Properties" },
        "menu.measurements" => if ru { "Измерения" } else { "Measurements" },
        "menu.watermark" => if ru { "Водяной знак" } else { "Watermark" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Primitives ──────────────────────────────────────
        "prim.box" => if ru { "Куб" } else { "Box" },
        "prim.sphere" => if ru { "Сфера" } else { "Sphere" },
        "prim.cylinder" => if ru { "Цилиндр" } else { "Cylinder" },

        // ── Toolbar ─────────────────────────────────────────
        "tb.tools" => if ru { "Инструменты" } else { "Tools" },
        "tb.add" => if ru { "Добавить" } else { "Add" },
        "tb.render" => if ru { "Сгенерировать рендер" } else { "Generate Render" },
        "tb.rendering" => if ru { "Рендеринг..." } else { "Rendering..." },

        "tool.select" => if ru { "Выбор  Q" } else { "Select  Q" },
        "tool.move" => if ru { "Перемещение  W" } else { "Move  W" },
        "tool.rotate" => if ru { "Поворот  E" } else { "Rotate  E" },
        "tool.scale" => if ru { "Масштаб  R" } else { "Scale  R" },
        "tool.measure" => if ru { "Измерение  M" } else { "Measure  M" },

        // ── Asset panel ─────────────────────────────────────
        "assets.title" => if ru { "Каталог деталей" } else { "Parts catalog" },
        "assets.assemble" => if ru { "Собрать выбранные" } else { "Assemble selected" },
        "assets.clear" => if ru { "Снять выбор" } else { "Clear selection" },
        "assets.upload" => if ru { "Загрузить модель..." } else { "Upload mesh..." },
        "assets.formats" => if ru { "GLB, glTF или OBJ" } else { "GLB, glTF or OBJ" },
        "assets.scene" => if ru { "Объекты сцены" } else { "Scene objects" },
        "assets.empty" => if ru { "Сцена пуста" } else { "Scene is empty" },

        // ── Properties ──────────────────────────────────────
        "prop.title" => if ru { "Свойства" } else { "Properties" },
        "prop.select_object" => if ru { "Выберите объект" } else { "Select an object" },
        "prop.to_view" => if ru { "для просмотра свойств" } else { "to view its properties" },
        "prop.not_found" => if ru { "Объект не найден" } else { "Object not found" },
        "prop.name" => if ru { "Имя" } else { "Name" },
        "prop.kind" => if ru { "Тип" } else { "Kind" },
        "prop.position" => if ru { "Позиция" } else { "Position" },
        "prop.rotation" => if ru { "Поворот (°)" } else { "Rotation (°)" },
        "prop.scale" => if ru { "Масштаб" } else { "Scale" },
        "prop.color" => if ru { "Цвет" } else { "Color" },

        // ── Measurements ────────────────────────────────────
        "meas.title" => if ru { "Измерения" } else { "Measurements" },
        "meas.none" => if ru { "Нет измерений" } else { "No measurements" },
        "meas.total" => if ru { "Сумма" } else { "Total" },
        "meas.clear" => if ru { "Очистить все" } else { "Clear all" },

        // ── Watermark ───────────────────────────────────────
        "wm.title" => if ru { "Водяной знак" } else { "Watermark" },
        "wm.enabled" => if ru { "Включить" } else { "Enabled" },
        "wm.text" => if ru { "Текст" } else { "Text" },
        "wm.opacity" => if ru { "Непрозрачность" } else { "Opacity" },

        // ── Render ──────────────────────────────────────────
        "render.prompt" => if ru { "Инструкция рендера" } else { "Render prompt" },
        "render.result" => if ru { "Результат рендера" } else { "Render result" },
        "render.download" => if ru { "Скачать" } else { "Download" },
        "render.download_title" => if ru { "Сохранить рендер" } else { "Save render" },
        "render.close" => if ru { "Закрыть" } else { "Close" },
        "render.error_title" => if ru { "Ошибка" } else { "Error" },
        "render.ok" => if ru { "OK" } else { "OK" },

        // ── Status bar ──────────────────────────────────────
        "status.objects" => if ru { "Объекты" } else { "Objects" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "status.rendering" => if ru { "Идёт рендеринг..." } else { "Rendering..." },
        "status.nav_hint" => if ru {
            "СКМ/Alt+ЛКМ: вращение | ПКМ: сдвиг | Колесо: масштаб"
        } else {
            "MMB/Alt+LMB: orbit | RMB: pan | Scroll: zoom"
        },

        "hint.select" => if ru { "Клик по объекту выбирает его" } else { "Click an object to select it" },
        "hint.transform" => if ru { "Тяните за ручки гизмо" } else { "Drag the gizmo handles" },
        "hint.no_selection" => if ru { "Сначала выберите объект" } else { "Select an object first" },
        "hint.measure_start" => if ru { "Клик по поверхности: первая точка" } else { "Click a surface: first point" },
        "hint.measure_end" => if ru { "Клик по поверхности: вторая точка (Esc отмена)" } else { "Click a surface: second point (Esc cancels)" },

        // ── Settings window ────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },

        "settings.render" => if ru { "Рендер" } else { "Render" },
        "settings.endpoint" => if ru { "Адрес сервиса" } else { "Service URL" },
        "settings.default_prompt" => if ru { "Инструкция по умолчанию" } else { "Default prompt" },

        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Grid lines" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },

        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background color" },
        "settings.sel_color" => if ru { "Цвет выделения" } else { "Selection color" },
        "settings.meas_color" => if ru { "Цвет измерений" } else { "Measurement color" },
        "settings.axes_labels" => if ru { "Подписи осей" } else { "Axis labels" },

        "settings.measurement" => if ru { "Измерения" } else { "Measurements" },
        "settings.precision" => if ru { "Знаков после запятой" } else { "Decimal places" },
        "settings.unit_suffix" => if ru { "Единица" } else { "Unit suffix" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
