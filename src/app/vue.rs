// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), Escape efface (app.rs)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Écran : taille de police selon la longueur de l’affichage
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, Theme, Touche};
use crate::noyau::reglages::CAPACITE_MAX;

/// Taille de police de l’écran selon le nombre de caractères affichés.
pub fn taille_police(longueur: usize) -> f32 {
    match longueur {
        0..=10 => 44.0,
        11..=14 => 34.0,
        15..=18 => 27.0,
        _ => 21.0,
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_entete(ui);
                ui.add_space(6.0);

                self.ui_ecran(ui);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);
                ui.add_space(8.0);
                self.ui_pave_numerique(ui);
            });
    }

    fn ui_entete(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Calculatrice");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let libelle = match self.preferences.theme {
                    Theme::Sombre => "☀",
                    Theme::Clair => "☾",
                };
                if ui
                    .button(libelle)
                    .on_hover_text("Basculer le thème")
                    .clicked()
                {
                    self.basculer_theme();
                }

                let mut sep = self.preferences.reglages.separateur_milliers;
                egui::ComboBox::from_id_salt("separateur_milliers")
                    .selected_text(format!("1{sep}000"))
                    .show_ui(ui, |ui| {
                        for c in [',', ' ', '.', '\''] {
                            ui.selectable_value(&mut sep, c, format!("1{c}000"));
                        }
                    });
                if sep != self.preferences.reglages.separateur_milliers {
                    self.set_separateur(sep);
                }

                let mut capacite = self.preferences.reglages.capacite_cache;
                let resp = ui
                    .add(
                        egui::DragValue::new(&mut capacite)
                            .range(0..=CAPACITE_MAX)
                            .prefix("cache "),
                    )
                    .on_hover_text("Nombre de résultats gardés en mémoire");
                if resp.changed() {
                    self.set_capacite_cache(capacite);
                }
            });
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button("⎘")
                        .on_hover_text("Copier le résultat")
                        .clicked()
                    {
                        ui.ctx().copy_text(self.affichage.clone());
                    }

                    let taille = taille_police(self.affichage.chars().count());
                    let mut texte = egui::RichText::new(&self.affichage).size(taille).monospace();
                    if !self.erreur.is_empty() {
                        texte = texte.color(ui.visuals().error_fg_color);
                    }
                    ui.label(texte);
                });
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3*4, sin(30), sqrt(2), pow(2,10)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if resp.changed() {
            self.vient_d_evaluer = false;
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.evaluer_entree();
        }
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for f in ["sin", "cos", "tan", "asin", "acos", "atan"] {
                self.bouton_insert(ui, f, &format!("{f}("), Touche::Fonction);
            }
        });
        ui.horizontal_wrapped(|ui| {
            for f in ["log", "ln", "sqrt", "pow"] {
                self.bouton_insert(ui, f, &format!("{f}("), Touche::Fonction);
            }
            self.bouton_insert(ui, "π", "pi", Touche::Constante);
            self.bouton_insert(ui, "e", "e", Touche::Constante);
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
                self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                self.bouton_insert(ui, "/", "/", Touche::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "7", "7", Touche::Chiffre);
                self.bouton_insert(ui, "8", "8", Touche::Chiffre);
                self.bouton_insert(ui, "9", "9", Touche::Chiffre);
                self.bouton_insert(ui, "*", "*", Touche::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", Touche::Chiffre);
                self.bouton_insert(ui, "5", "5", Touche::Chiffre);
                self.bouton_insert(ui, "6", "6", Touche::Chiffre);
                self.bouton_insert(ui, "-", "-", Touche::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", Touche::Chiffre);
                self.bouton_insert(ui, "2", "2", Touche::Chiffre);
                self.bouton_insert(ui, "3", "3", Touche::Chiffre);
                self.bouton_insert(ui, "+", "+", Touche::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "(", "(", Touche::Parenthese);
                self.bouton_insert(ui, ")", ")", Touche::Operateur);
                self.bouton_insert(ui, ",", ",", Touche::Virgule);
                self.bouton_insert(ui, ".", ".", Touche::Chiffre);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", Touche::Chiffre);
                ui.label("");
                ui.label("");
                let eq = ui.add_sized([56.0, 36.0], egui::Button::new("="));
                if eq.clicked() {
                    self.evaluer_entree();
                }
                ui.end_row();
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 36.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, touche: Touche) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert, touche);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
}
