// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Localized interface strings.

use arogya_core::types::Language;

/// Fixed interface strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct UiText {
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub typing: &'static str,
}

/// Returns the interface strings for the given language.
pub fn ui_text(language: Language) -> UiText {
    match language {
        Language::En => UiText {
            title: "Arogya",
            description: "Your friendly multilingual health assistant.",
            placeholder: "Describe your symptom...",
            typing: "Typing...",
        },
        Language::Hi => UiText {
            title: "आरोग्य",
            description: "आपका दोस्ताना बहुभाषी स्वास्थ्य सहायक।",
            placeholder: "अपने लक्षण दर्ज करें...",
            typing: "लिखा जा रहा है...",
        },
        Language::Mr => UiText {
            title: "आरोग्य",
            description: "तुमचा मैत्रीपूर्ण आरोग्य सहाय्यक.",
            placeholder: "तुमचे लक्षण टाका...",
            typing: "टायपिंग चालू आहे...",
        },
        Language::Gu => UiText {
            title: "આરોગ્ય",
            description: "તમારું મિત્રતાપૂર્વકનું આરોગ્ય સહાયક.",
            placeholder: "તમારું લક્ષણ લખો...",
            typing: "લખાઈ રહ્યુ છે...",
        },
        Language::Te => UiText {
            title: "ఆరోగ్య",
            description: "మీ మిత్రుడైన ఆరోగ్య సహాయకుడు.",
            placeholder: "మీ లక్షణాలు వివరించండి...",
            typing: "టైప్ జరుగుతోంది...",
        },
    }
}

/// Quick symptom shortcuts shown alongside the composer.
pub fn keyword_shortcuts(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &["🤒 Fever", "🤧 Cold", "💊 Medicine", "😷 Cough", "🤕 Headache"],
        Language::Hi => &["🤒 बुखार", "🤧 सर्दी", "💊 दवा", "😷 खांसी", "🤕 सिरदर्द"],
        Language::Mr => &["🤒 ताप", "🤧 सर्दी", "💊 औषध", "😷 खोकला", "🤕 डोकेदुखी"],
        Language::Gu => &["🤒 તાવ", "🤧 ઠંડક", "💊 દવા", "😷 ખાંસી", "🤕 માથાનો દુખાવો"],
        Language::Te => &["🤒 జ్వరం", "🤧 జలుబు", "💊 మందు", "😷 దగ్గు", "🤕 తలనొప్పి"],
    }
}
