//! Canned assistant replies: ordered (pattern, response) pairs, first containment match wins.

use std::str::FromStr;
use std::time::Duration;

/// Pause before the assistant answers.
pub const REPLY_DELAY: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
}

impl Language {
    pub fn key(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    fn fallback_reply(self) -> &'static str {
        match self {
            Language::Fr => "Je comprends votre question. Laissez-moi vous aider avec cela.",
            Language::En => "I understand your question. Let me help you with that. You can ask me about flights, services, or navigating the airport.",
            Language::Ar => "أفهم سؤالك. دعني أساعدك في ذلك. يمكنك سؤالي عن الرحلات، الخدمات، أو التنقل في المطار.",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

const HOW_IT_WORKS_FR: &str = "AeroWay est votre assistant intelligent pour l'aéroport. Vous pouvez suivre vos vols, naviguer avec la carte 3D, recevoir des notifications et utiliser le système Meet & Greet.";
const HOW_IT_WORKS_EN: &str = "AeroWay is your intelligent airport assistant. You can track flights, navigate with 3D maps, receive notifications, and use the Meet & Greet system.";
const HOW_IT_WORKS_AR: &str = "AeroWay هو مساعدك الذكي في المطار. يمكنك تتبع رحلاتك، والتنقل بالخريطة ثلاثية الأبعاد، وتلقي الإشعارات واستخدام نظام Meet & Greet.";
const WHAT_CAN_I_DO_FR: &str = "Vous pouvez : suivre vos vols en temps réel, naviguer dans l'aéroport avec la carte 3D, recevoir des notifications personnalisées, utiliser le chatbot vocal, et partager votre localisation avec vos proches.";
const WHAT_CAN_I_DO_EN: &str = "You can: track flights in real-time, navigate the airport with 3D maps, receive personalized notifications, use voice chatbot, and share your location with loved ones.";
const WHAT_CAN_I_DO_AR: &str = "يمكنك: تتبع رحلاتك في الوقت الفعلي، والتنقل في المطار بالخريطة ثلاثية الأبعاد، وتلقي إشعارات مخصصة، واستخدام الدردشة الصوتية، ومشاركة موقعك مع أحبائك.";

/// Answers for the app-usage questions follow the selected language; the rest are fixed.
fn builtin_entries(lang: Language) -> Vec<(String, String)> {
    let (how, what) = match lang {
        Language::Fr => (HOW_IT_WORKS_FR, WHAT_CAN_I_DO_FR),
        Language::En => (HOW_IT_WORKS_EN, WHAT_CAN_I_DO_EN),
        Language::Ar => (HOW_IT_WORKS_AR, WHAT_CAN_I_DO_AR),
    };
    let pairs: [(&str, &str); 15] = [
        ("comment fonctionne l'application", how),
        ("how does the application work", how),
        ("كيف يعمل التطبيق", how),
        ("que puis-je faire", what),
        ("what can i do", what),
        ("ماذا يمكنني أن أفعل", what),
        ("où est mon terminal", "Je peux vous aider à localiser votre terminal. Avez-vous votre numéro de billet ?"),
        ("where is my terminal", "I can help you locate your terminal. Do you have your ticket number?"),
        ("أين المحطة الخاصة بي", "يمكنني مساعدتك في تحديد موقع المحطة. هل لديك رقم التذكرة؟"),
        ("retard de vol", "En cas de retard, vérifiez les écrans d'information ou l'application vous enverra une notification automatique."),
        ("flight delay", "In case of delay, check the information screens or the app will send you an automatic notification."),
        ("تأخير الرحلة", "في حالة التأخير، تحقق من شاشات المعلومات أو ستتلقى إشعارًا تلقائيًا من التطبيق."),
        ("aide", "Je suis là pour vous aider ! Vous pouvez me poser des questions sur l'aéroport, vos vols, ou l'utilisation de l'application."),
        ("help", "I'm here to help! You can ask me questions about the airport, your flights, or how to use the app."),
        ("مساعدة", "أنا هنا لمساعدتك! يمكنك سؤالي عن المطار أو رحلاتك أو كيفية استخدام التطبيق."),
    ];
    pairs.iter().map(|(p, r)| (p.to_string(), r.to_string())).collect()
}

#[derive(Clone, Debug)]
pub struct Phrasebook {
    language: Language,
    entries: Vec<(String, String)>,
}

impl Phrasebook {
    pub fn new(language: Language) -> Self {
        Self { language, entries: builtin_entries(language) }
    }

    /// Builds a phrasebook from explicit pairs, scanned in the given order.
    pub fn from_entries(language: Language, entries: Vec<(String, String)>) -> Self {
        Self { language, entries }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn reply(&self, input: &str) -> &str {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|(pattern, _)| lowered.contains(&pattern.to_lowercase()))
            .map(|(_, response)| response.as_str())
            .unwrap_or_else(|| self.language.fallback_reply())
    }
}
