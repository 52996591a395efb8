//! Built-in reference data
//!
//! The seed catalog used to initialize empty storage on first run, and the
//! static list of supported languages.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{Book, BookTranslation, Language};

/// Languages the application supports, in display order
pub const AVAILABLE_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", native_name: "English" },
    Language { code: "es", name: "Spanish", native_name: "Español" },
    Language { code: "fr", name: "French", native_name: "Français" },
    Language { code: "de", name: "German", native_name: "Deutsch" },
    Language { code: "it", name: "Italian", native_name: "Italiano" },
    Language { code: "zh", name: "Chinese", native_name: "中文" },
    Language { code: "ja", name: "Japanese", native_name: "日本語" },
];

/// The fixed sample catalog written to storage on first-ever load
///
/// Ids are stable ("1".."3"); book "3" starts out purchased and shelved,
/// matching the default user profile that lists it as owned.
pub fn seed_books() -> Vec<Book> {
    vec![sample_one(), sample_two(), sample_three()]
}

fn sample_one() -> Book {
    let now = Utc::now();
    let mut translations = BTreeMap::new();
    translations.insert(
        "es".to_string(),
        BookTranslation::new(
            "El Arte de la Programación",
            "Una guía completa de técnicas de programación modernas y mejores prácticas.",
            "Este libro cubre conceptos fundamentales de programación, patrones de diseño y \
             técnicas avanzadas utilizadas en el desarrollo de software.",
        ),
    );
    translations.insert(
        "fr".to_string(),
        BookTranslation::new(
            "L'Art de la Programmation",
            "Un guide complet des techniques de programmation modernes et des meilleures \
             pratiques.",
            "Ce livre couvre les concepts fondamentaux de programmation, les modèles de \
             conception et les techniques avancées utilisées dans le développement logiciel.",
        ),
    );

    Book {
        id: "1".to_string(),
        title: "The Art of Programming".to_string(),
        author: "John Smith".to_string(),
        description: "A comprehensive guide to modern programming techniques and best practices."
            .to_string(),
        summary: "This book covers fundamental programming concepts, design patterns, and \
                  advanced techniques used in software development. Perfect for both beginners \
                  and experienced developers."
            .to_string(),
        cover_image: None,
        pdf_url: None,
        audio_url: None,
        languages: vec!["en".to_string(), "es".to_string(), "fr".to_string()],
        translations,
        price: Some(29.99),
        is_purchased: false,
        is_in_library: false,
        created_at: now,
        updated_at: now,
        writer_id: None,
        notes: Vec::new(),
        highlights: Vec::new(),
    }
}

fn sample_two() -> Book {
    let now = Utc::now();
    let mut translations = BTreeMap::new();
    translations.insert(
        "de".to_string(),
        BookTranslation::new(
            "Digitales Marketing Meisterschaft",
            "Meistern Sie die Kunst des digitalen Marketings im modernen Zeitalter.",
            "Lernen Sie, wie Sie effektive digitale Marketingkampagnen erstellen, Analysen \
             verstehen und Ihre Online-Präsenz durch bewährte Strategien ausbauen.",
        ),
    );
    translations.insert(
        "it".to_string(),
        BookTranslation::new(
            "Padronanza del Marketing Digitale",
            "Padroneggia l'arte del marketing digitale nell'era moderna.",
            "Impara come creare campagne di marketing digitale efficaci, comprendere le analisi \
             e far crescere la tua presenza online attraverso strategie comprovate.",
        ),
    );

    Book {
        id: "2".to_string(),
        title: "Digital Marketing Mastery".to_string(),
        author: "Sarah Johnson".to_string(),
        description: "Master the art of digital marketing in the modern age.".to_string(),
        summary: "Learn how to create effective digital marketing campaigns, understand \
                  analytics, and grow your online presence through proven strategies."
            .to_string(),
        cover_image: None,
        pdf_url: None,
        audio_url: None,
        languages: vec!["en".to_string(), "de".to_string(), "it".to_string()],
        translations,
        price: Some(24.99),
        is_purchased: false,
        is_in_library: false,
        created_at: now,
        updated_at: now,
        writer_id: None,
        notes: Vec::new(),
        highlights: Vec::new(),
    }
}

fn sample_three() -> Book {
    let now = Utc::now();
    let mut translations = BTreeMap::new();
    translations.insert(
        "zh".to_string(),
        BookTranslation::new(
            "正念生活",
            "在忙碌世界中正念生活的指南。",
            "通过古老智慧和现代科学，发现正念、减压和在日常生活中找到平衡的实用技巧。",
        ),
    );
    translations.insert(
        "ja".to_string(),
        BookTranslation::new(
            "マインドフルな生活",
            "忙しい世界でマインドフルに生きるためのガイド。",
            "古代の知恵と現代科学を通じて、マインドフルネス、ストレス軽減、日常生活での\
             バランスを見つけるための実践的なテクニックを発見してください。",
        ),
    );

    Book {
        id: "3".to_string(),
        title: "Mindful Living".to_string(),
        author: "Dr. Emily Chen".to_string(),
        description: "A guide to living mindfully in a busy world.".to_string(),
        summary: "Discover practical techniques for mindfulness, stress reduction, and finding \
                  balance in your daily life through ancient wisdom and modern science."
            .to_string(),
        cover_image: None,
        pdf_url: None,
        audio_url: None,
        languages: vec!["en".to_string(), "zh".to_string(), "ja".to_string()],
        translations,
        price: Some(19.99),
        is_purchased: true,
        is_in_library: true,
        created_at: now,
        updated_at: now,
        writer_id: None,
        notes: Vec::new(),
        highlights: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_seed_ids_are_unique_and_stable() {
        let books = seed_books();
        assert_eq!(books.len(), 3);
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_seed_ownership_flags() {
        let books = seed_books();
        assert!(!books[0].is_purchased);
        assert!(!books[1].is_in_library);
        // Book "3" is pre-owned, matching the default user profile.
        assert!(books[2].is_purchased);
        assert!(books[2].is_in_library);
        let user = User::default_reader();
        assert!(user.purchased_books.contains(&books[2].id));
    }

    #[test]
    fn test_seed_translations_are_sparse() {
        let books = seed_books();
        // Base language has no translation entry; lookups fall back.
        assert!(books[0].translation("en").is_none());
        assert_eq!(books[0].display_title("en"), "The Art of Programming");
        assert_eq!(books[0].display_title("es"), "El Arte de la Programación");
        assert_eq!(books[2].display_title("zh"), "正念生活");
    }

    #[test]
    fn test_language_list() {
        assert_eq!(AVAILABLE_LANGUAGES.len(), 7);
        assert_eq!(AVAILABLE_LANGUAGES[0].code, "en");
        let ja = AVAILABLE_LANGUAGES.iter().find(|l| l.code == "ja").unwrap();
        assert_eq!(ja.native_name, "日本語");
    }
}
