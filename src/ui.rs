use crossbeam_channel::Receiver;
use deepo::actions::{self, ClipboardWriter, DirectorySaver};
use deepo::api::TranslationService;
use deepo::config::Config;
use deepo::controller::{self, ControllerOptions, Phase, TranslationController};
use deepo::languages::{lang_name, LanguageDirectory, LanguagePickers, Side};
use deepo::logger;
use deepo::status::Status;
use deepo::store::JsonFileStore;
use deepo::theme::{Theme, ThemeStore};
use eframe::egui;
use egui_phosphor::regular as icons;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

struct DeepoApp {
    controller: TranslationController,
    pickers: LanguagePickers,
    themes: ThemeStore<JsonFileStore>,
    saver: DirectorySaver,
    directory_rx: Receiver<Option<LanguageDirectory>>,
    input_buf: String,
    applied_theme: Option<Theme>,
    focus_search: bool,
}

fn clipboard(ctx: &egui::Context) -> Box<dyn ClipboardWriter> {
    #[cfg(windows)]
    {
        let _ = ctx;
        Box::new(actions::SystemClipboard)
    }
    #[cfg(not(windows))]
    {
        Box::new(actions::EguiClipboard(ctx.clone()))
    }
}

impl DeepoApp {
    fn poll_directory(&mut self) {
        // Drain; at most one directory ever arrives
        while let Ok(dir) = self.directory_rx.try_recv() {
            match dir {
                Some(dir) => {
                    self.controller.apply_directory(&dir);
                    self.pickers = LanguagePickers::from_directory(&dir);
                }
                None => logger::log("UI: running without language directory"),
            }
            if self.controller.phase() == Phase::Idle {
                self.controller.report(Status::Ready);
            }
        }
    }

    fn copy(&self, ctx: &egui::Context, text: &str) {
        match actions::copy_text(clipboard(ctx).as_ref(), text) {
            Ok(_) => self.controller.report(Status::Copied),
            Err(e) => {
                logger::log(&format!("Copy failed: {}", e));
                self.controller.report(Status::Failed(e.to_string()));
            }
        }
    }

    fn download(&self, output: &str, target_lang: &str) {
        match actions::download_output(&self.saver, output, target_lang) {
            Ok(path) => self.controller.report(Status::Saved(path)),
            Err(e) => {
                logger::log(&format!("Download failed: {:#}", e));
                self.controller.report(Status::Failed(e.to_string()));
            }
        }
    }

    fn toggle_theme(&mut self) {
        if let Err(e) = self.themes.toggle() {
            logger::log(&format!("Theme not persisted: {:#}", e));
        }
    }

    fn picker_window(&mut self, ctx: &egui::Context, current: &str) {
        let Some(side) = self.pickers.open_side() else { return };
        let title = match side {
            Side::Source => "Langue source",
            Side::Target => "Langue cible",
        };
        let focus = std::mem::take(&mut self.focus_search);
        let mut picked = None;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let picker = self.pickers.get_mut(side);
                ui.horizontal(|ui| {
                    ui.label(icons::MAGNIFYING_GLASS);
                    let search = ui.text_edit_singleline(&mut picker.query);
                    if focus {
                        search.request_focus();
                    }
                });
                ui.separator();
                egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
                    let rows = picker.filtered();
                    if rows.is_empty() {
                        ui.weak("Aucune langue");
                    }
                    for code in rows {
                        let label = format!("{}    {}", lang_name(code), code);
                        if ui.selectable_label(code == current, label).clicked() {
                            picked = Some(code.to_string());
                        }
                    }
                });
            });

        if let Some(code) = picked {
            let (side, code) = self.pickers.pick(side, &code);
            self.controller.select_language(side, &code);
        }
    }
}

impl eframe::App for DeepoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Wake up periodically so background results show without user events
        ctx.request_repaint_after(Duration::from_millis(120));
        self.poll_directory();

        let theme = self.themes.current();
        if self.applied_theme != Some(theme) {
            ctx.set_visuals(theme.visuals());
            self.applied_theme = Some(theme);
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.pickers.close_all();
        }

        let state = self.controller.snapshot();
        let sel = state.selection.clone();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Deepo");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(theme.glyph()).on_hover_text("Thème").clicked() {
                        self.toggle_theme();
                    }
                    if ui.button(format!("{} Démo", icons::SPARKLE)).clicked() {
                        self.controller.fill_demo();
                    }
                });
            });
            ui.horizontal(|ui| {
                let source = format!("{} {}", lang_name(&sel.source_lang), icons::CARET_DOWN);
                if ui.button(source).clicked() {
                    self.pickers.toggle(Side::Source);
                    self.focus_search = true;
                }
                if ui.button(icons::ARROWS_LEFT_RIGHT).on_hover_text("Inverser").clicked() {
                    self.controller.swap();
                }
                let target = format!("{} {}", lang_name(&sel.target_lang), icons::CARET_DOWN);
                if ui.button(target).clicked() {
                    self.pickers.toggle(Side::Target);
                    self.focus_search = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let text = egui::RichText::new(state.status.to_string());
                if state.status.is_error() {
                    ui.label(text.color(ui.visuals().error_fg_color));
                } else {
                    ui.label(text);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(icons::DOWNLOAD_SIMPLE).on_hover_text("Télécharger").clicked() {
                        self.download(&state.output, &sel.target_lang);
                    }
                    if ui.button(icons::TRASH).on_hover_text("Effacer").clicked() {
                        self.controller.clear();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                self.input_buf.clone_from(&state.input);
                cols[0].horizontal(|ui| {
                    ui.label(format!("{} caractères", self.controller.input_len()));
                    if ui.button(icons::COPY).on_hover_text("Copier").clicked() {
                        self.copy(ctx, &state.input);
                    }
                });
                let edited = cols[0]
                    .add(
                        egui::TextEdit::multiline(&mut self.input_buf)
                            .hint_text("Saisis ton texte")
                            .desired_rows(18)
                            .desired_width(f32::INFINITY),
                    )
                    .changed();
                if edited {
                    let text = self.input_buf.clone();
                    self.controller.on_input_changed(&text);
                }

                cols[1].horizontal(|ui| {
                    ui.label("Traduction");
                    if ui.button(icons::COPY).on_hover_text("Copier").clicked() {
                        self.copy(ctx, &state.output);
                    }
                });
                cols[1].add(
                    egui::TextEdit::multiline(&mut state.output.as_str())
                        .desired_rows(18)
                        .desired_width(f32::INFINITY),
                );
            });
        });

        self.picker_window(ctx, sel.get(self.pickers.open_side().unwrap_or(Side::Source)));
    }
}

impl Drop for DeepoApp {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}

/// Builds the window and blocks on the event loop.
pub fn run(cfg: &Config, runtime: Handle, service: Arc<dyn TranslationService>) {
    let (tx, directory_rx) = crossbeam_channel::bounded(1);
    {
        let service = Arc::clone(&service);
        runtime.spawn(async move {
            let dir = controller::fetch_directory(service.as_ref()).await;
            let _ = tx.send(dir);
        });
    }

    let controller = TranslationController::new(service, runtime, ControllerOptions::from_config(cfg));
    let themes = ThemeStore::load(JsonFileStore::open(JsonFileStore::default_path()));

    logger::log("Main UI: starting event loop");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Deepo")
            .with_inner_size([960.0, 620.0]),
        ..Default::default()
    };
    match eframe::run_native(
        "Deepo",
        native_options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Box::new(DeepoApp {
                controller,
                pickers: LanguagePickers::default(),
                themes,
                saver: DirectorySaver::downloads(),
                directory_rx,
                input_buf: String::new(),
                applied_theme: None,
                focus_search: false,
            })
        }),
    ) {
        Ok(_) => logger::log("Main UI: event loop exited"),
        Err(e) => logger::log(&format!("Main UI error: {}", e)),
    }
}
