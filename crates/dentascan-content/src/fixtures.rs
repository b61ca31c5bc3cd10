//! Built-in content tables.
//!
//! The condition encyclopedia, the research study list, and the Jakarta
//! clinic directory. Values are data, not behavior; they are constructed
//! once and shared for the life of the process.

use once_cell::sync::Lazy;

use crate::{
    Clinic, ConditionDetail, Coordinates, DentalCondition, DetailCard, DetailSection, OpenHours,
    Study, TeamMember, TipGroup,
};

/// Returns the condition encyclopedia in display order.
#[must_use]
pub fn conditions() -> &'static [DentalCondition] {
    &CONDITIONS
}

/// Looks up a condition by its URL identifier.
#[must_use]
pub fn condition_by_id(id: &str) -> Option<&'static DentalCondition> {
    CONDITIONS.iter().find(|condition| condition.id == id)
}

/// Returns the research studies in display order.
#[must_use]
pub fn studies() -> &'static [Study] {
    &STUDIES
}

/// Returns the clinic directory in display order.
#[must_use]
pub fn clinics() -> &'static [Clinic] {
    &CLINICS
}

/// Returns the project team in display order.
#[must_use]
pub fn team() -> &'static [TeamMember] {
    &TEAM
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

static CONDITIONS: Lazy<Vec<DentalCondition>> = Lazy::new(|| {
    vec![
        DentalCondition {
            id: "caries".to_owned(),
            name: "Dental Caries (Cavities)".to_owned(),
            description: "Dental caries, commonly known as tooth decay or cavities, is one of \
                          the most prevalent chronic diseases worldwide. It occurs when bacteria \
                          in your mouth produce acids that gradually destroy tooth enamel."
                .to_owned(),
            image_url: "/Dental_Carries.jpg".to_owned(),
            symptoms: owned(&[
                "Toothache or pain",
                "Sensitivity to hot, cold, or sweet foods",
                "Visible holes in teeth",
                "Dark spots on tooth surfaces",
                "Pain when biting down",
            ]),
            detail: ConditionDetail {
                title: "Understanding Dental Caries".to_owned(),
                intro: "Dental caries is a progressive disease that begins with microscopic \
                        damage to the tooth enamel and can eventually lead to visible cavities. \
                        The condition is caused by the interaction between bacteria in dental \
                        plaque, sugars from food, and the tooth's surface."
                    .to_owned(),
                image_url: "/Dental_Carries.jpg".to_owned(),
                sections: vec![
                    DetailSection::cards(
                        "Stages of Cavity Formation",
                        vec![
                            DetailCard::new(
                                "Initial Demineralization",
                                "Appears as white spots on teeth, indicating the beginning of decay",
                            ),
                            DetailCard::new(
                                "Enamel Decay",
                                "Surface becomes soft and damaged as decay progresses",
                            ),
                            DetailCard::new(
                                "Dentin Decay",
                                "Damage reaches the layer beneath enamel, causing increased sensitivity",
                            ),
                            DetailCard::new(
                                "Pulp Involvement",
                                "Infection reaches the tooth's nerve center, often requiring root canal",
                            ),
                        ],
                    ),
                    DetailSection::tips(
                        "Prevention Tips",
                        owned(&[
                            "Brush teeth twice daily with fluoride toothpaste",
                            "Floss daily to remove plaque between teeth",
                            "Limit sugary and acidic foods",
                            "Visit your dentist regularly for checkups",
                            "Consider dental sealants for cavity prevention",
                        ]),
                    ),
                ],
                video_url: "https://www.youtube.com/embed/zGoBFU1q4g0?si=8zEDrWkOQWDtFB3S"
                    .to_owned(),
            },
        },
        DentalCondition {
            id: "cracks".to_owned(),
            name: "Cracked Tooth".to_owned(),
            description: "A cracked tooth can range from a minor hairline fracture to a severe \
                          split in the tooth structure. Understanding the type and extent of the \
                          crack is crucial for proper treatment."
                .to_owned(),
            image_url: "/Cracked_Tooth.jpg".to_owned(),
            symptoms: owned(&[
                "Pain when chewing",
                "Sensitivity to temperature changes",
                "Intermittent pain",
                "Swelling of surrounding gums",
                "Difficulty pinpointing the exact painful tooth",
            ]),
            detail: ConditionDetail {
                title: "Understanding Cracked Teeth".to_owned(),
                intro: "A cracked tooth can range from a minor hairline fracture to a severe \
                        split in the tooth structure. Understanding the type and extent of the \
                        crack is crucial for proper treatment and preventing further damage."
                    .to_owned(),
                image_url: "/Cracked_Tooth.jpg".to_owned(),
                sections: vec![
                    DetailSection::cards(
                        "Types of Tooth Cracks",
                        vec![
                            DetailCard::new(
                                "Craze Lines",
                                "Superficial cracks affecting only the enamel, usually harmless",
                            ),
                            DetailCard::new(
                                "Fractured Cusp",
                                "Damage to the pointed chewing surface of the tooth",
                            ),
                            DetailCard::new(
                                "Split Tooth",
                                "Complete separation of tooth segments, often requires extraction",
                            ),
                            DetailCard::new(
                                "Vertical Root Fracture",
                                "Crack begins in the root and extends upward",
                            ),
                        ],
                    ),
                    DetailSection::tips(
                        "Risk Factors",
                        owned(&[
                            "Large existing fillings",
                            "Teeth grinding (bruxism)",
                            "Trauma or injury",
                            "Age (more common in older adults)",
                        ]),
                    ),
                ],
                video_url: "https://www.youtube.com/embed/UdL2pKeKvmk?si=mTdCUU9tHdy48Kw8"
                    .to_owned(),
            },
        },
        DentalCondition {
            id: "gingivitis".to_owned(),
            name: "Gingivitis".to_owned(),
            description: "Gingivitis is the earliest stage of gum disease, characterized by \
                          inflammation of the gums. If left untreated, it can progress to more \
                          serious periodontal disease."
                .to_owned(),
            image_url: "https://images.pexels.com/photos/4269693/pexels-photo-4269693.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
            symptoms: owned(&[
                "Red, swollen gums",
                "Bleeding when brushing or flossing",
                "Bad breath",
                "Receding gums",
                "Tender or sensitive gums",
            ]),
            detail: ConditionDetail {
                title: "Understanding Gingivitis".to_owned(),
                intro: "Gingivitis is a common and mild form of gum disease that causes \
                        irritation, redness, and inflammation of the gingiva, the part of your \
                        gum around the base of your teeth. Early detection and treatment can \
                        prevent its progression to more serious periodontal disease."
                    .to_owned(),
                image_url: "https://images.pexels.com/photos/4269693/pexels-photo-4269693.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2"
                    .to_owned(),
                sections: vec![
                    DetailSection::cards(
                        "Common Signs and Symptoms",
                        vec![
                            DetailCard::new(
                                "Swollen or Puffy Gums",
                                "Gums appear red and inflamed, may be tender to touch",
                            ),
                            DetailCard::new(
                                "Bleeding Gums",
                                "Bleeding during brushing or flossing is a common sign",
                            ),
                            DetailCard::new(
                                "Bad Breath",
                                "Persistent bad breath or bad taste in the mouth",
                            ),
                            DetailCard::new(
                                "Receding Gums",
                                "Gums pulling away from teeth, making teeth appear longer",
                            ),
                        ],
                    ),
                    DetailSection::groups(
                        "Prevention and Treatment",
                        vec![
                            TipGroup::new(
                                "Daily Oral Care",
                                owned(&[
                                    "Brush teeth properly at least twice daily",
                                    "Use dental floss daily",
                                    "Use an antiseptic mouthwash",
                                ]),
                            ),
                            TipGroup::new(
                                "Professional Treatment",
                                owned(&[
                                    "Regular dental checkups and cleanings",
                                    "Professional scaling and root planing if needed",
                                    "Follow-up visits to monitor improvement",
                                ]),
                            ),
                        ],
                    ),
                ],
                video_url: "https://www.youtube.com/embed/FViqyY8h4wE?si=lFek0e9ArvGAnire"
                    .to_owned(),
            },
        },
    ]
});

static STUDIES: Lazy<Vec<Study>> = Lazy::new(|| {
    vec![
        Study {
            title: "Deep learning for caries detection: A systematic review".to_owned(),
            authors: owned(&[
                "Hossein Mohammad-Rahimi.",
                "Saeed Reza Motamedian.",
                "Mohammad Hossein Rohban.",
                "Joachim Krois.",
                "Sergio E. Uribe.",
                "Erfan Mahmoudinia.",
                "Rata Rokhshad.",
                "Mohadeseh Nadimi.",
                "Falk Schwendicke.",
            ]),
            journal: "Journal of Destistry".to_owned(),
            year: 2022,
            abstract_text: "Detecting caries lesions is challenging for dentists, and deep \
                            learning models may help practitioners to increase accuracy and \
                            reliability. We aimed to systematically review deep learning studies \
                            on caries detection."
                .to_owned(),
            link: "https://www.sciencedirect.com/science/article/abs/pii/S0300571222001725"
                .to_owned(),
        },
        Study {
            title: "An AI-Powered Method for Detecting Gingivitis".to_owned(),
            authors: owned(&[
                "Sathya Sai Ram.",
                "Thrisha Reddy.",
                "Dhanushwaran.",
                "S. Balamithra.",
                "Harisudha Kuresan",
            ]),
            journal: "International Conference on Innovattive Computing and Communication"
                .to_owned(),
            year: 2025,
            abstract_text: "Gingivitis is a common dental illness triggered by the accumulation \
                            of plaque which has to be diagnosed and treated early to avoid the \
                            possible evolution to more advanced forms of perio- dontal diseases. \
                            This research employs machine learning methods employing XGBoost to \
                            help identify the levels of gingivitis i.e. now, mild, and severe \
                            based on clinical parameters such as plaque scores, presence of \
                            bleeding on probing, and gum color. ."
                .to_owned(),
            link: "https://papers.ssrn.com/sol3/papers.cfm?abstract_id=5170629".to_owned(),
        },
        Study {
            title: "Current applications and development of artificial intelligence for digital \
                    dental radiography"
                .to_owned(),
            authors: owned(&[
                "Ramadhan Hardani Putra.",
                "Chiaki Doi.",
                "Nuborio Yoda.",
                "Eha Renwi Astuti.",
                "Keiichi Sasaki.",
            ]),
            journal: "Oxford Academic".to_owned(),
            year: 2022,
            abstract_text: "In the last few years, artificial intelligence (AI) research has \
                            been rapidly developing and emerging in the field of dental and \
                            maxillofacial radiology. Dental radiography, which is commonly used \
                            in daily practices, provides an incredibly rich resource for AI \
                            development and attracted many researchers to develop its \
                            application for various purposes."
                .to_owned(),
            link: "https://academic.oup.com/dmfr/article/51/1/20210197/7261223".to_owned(),
        },
    ]
});

static TEAM: Lazy<Vec<TeamMember>> = Lazy::new(|| {
    vec![
        TeamMember {
            name: "Ezraliano Sachio Krisnadiva".to_owned(),
            role: "Lead Developer".to_owned(),
            bio: "Full-stack developer specializing in AI Engineer and Web Development."
                .to_owned(),
            image_url: "/Foto Ezraliano.jpg".to_owned(),
            linkedin_url:
                "https://www.linkedin.com/in/ezraliano-sachio-krisnadiva-358028241/".to_owned(),
        },
        TeamMember {
            name: "Farhan Rasyad".to_owned(),
            role: "AI Engineer".to_owned(),
            bio: "Expert in machine learning and computer vision for medical applications."
                .to_owned(),
            image_url: "https://images.pexels.com/photos/2182970/pexels-photo-2182970.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
            linkedin_url: "https://www.linkedin.com/in/farhanrasyad/".to_owned(),
        },
        TeamMember {
            name: "Margareta Lola Lali Lulita".to_owned(),
            role: "Data Scientist".to_owned(),
            bio: "Specialized in data analysis and visualization for healthcare.".to_owned(),
            image_url: "https://images.pexels.com/photos/3796217/pexels-photo-3796217.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
            linkedin_url: "https://linkedin.com/in/margareta-lola".to_owned(),
        },
        TeamMember {
            name: "Muhammad Rafi Ilham".to_owned(),
            role: "AI Engineer".to_owned(),
            bio: "Specialized in AI algorithms and deep learning for image processing.".to_owned(),
            image_url: "https://images.pexels.com/photos/2379005/pexels-photo-2379005.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
            linkedin_url: "https://www.linkedin.com/in/muhammad-rafi-ilham/".to_owned(),
        },
    ]
});

static CLINICS: Lazy<Vec<Clinic>> = Lazy::new(|| {
    vec![
        Clinic {
            id: "clinic-001".to_owned(),
            name: "Jakarta Dental Center".to_owned(),
            address: "Jl. Sudirman No. 123, Tanah Abang, Jakarta Pusat".to_owned(),
            phone: "+62 21 5555 1234".to_owned(),
            email: "info@jakartadentalcenter.com".to_owned(),
            website: Some("https://jakartadentalcenter.com".to_owned()),
            specialties: owned(&["General Dentistry", "Orthodontics", "Oral Surgery"]),
            rating: 4.8,
            open_hours: OpenHours {
                weekdays: "08:00 - 20:00".to_owned(),
                saturday: "08:00 - 17:00".to_owned(),
                sunday: "09:00 - 15:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2088,
                lng: 106.8456,
            },
            description: "Modern dental clinic with state-of-the-art equipment and experienced \
                          dentists."
                .to_owned(),
            image: "https://images.pexels.com/photos/3779709/pexels-photo-3779709.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-002".to_owned(),
            name: "Smile Care Clinic".to_owned(),
            address: "Jl. Thamrin No. 456, Menteng, Jakarta Pusat".to_owned(),
            phone: "+62 21 5555 2345".to_owned(),
            email: "contact@smilecare.co.id".to_owned(),
            website: None,
            specialties: owned(&["Cosmetic Dentistry", "Implants", "Periodontics"]),
            rating: 4.7,
            open_hours: OpenHours {
                weekdays: "09:00 - 21:00".to_owned(),
                saturday: "09:00 - 18:00".to_owned(),
                sunday: "Closed".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.1944,
                lng: 106.8229,
            },
            description: "Specialized in cosmetic dentistry and smile makeovers with advanced \
                          technology."
                .to_owned(),
            image: "https://images.pexels.com/photos/3845126/pexels-photo-3845126.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-003".to_owned(),
            name: "Dental Plus Kemang".to_owned(),
            address: "Jl. Kemang Raya No. 789, Kemang, Jakarta Selatan".to_owned(),
            phone: "+62 21 5555 3456".to_owned(),
            email: "info@dentalpluskemang.com".to_owned(),
            website: None,
            specialties: owned(&["Pediatric Dentistry", "General Dentistry", "Emergency Care"]),
            rating: 4.6,
            open_hours: OpenHours {
                weekdays: "08:00 - 19:00".to_owned(),
                saturday: "08:00 - 16:00".to_owned(),
                sunday: "10:00 - 14:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2615,
                lng: 106.8106,
            },
            description: "Family-friendly dental clinic specializing in pediatric and general \
                          dentistry."
                .to_owned(),
            image: "https://images.pexels.com/photos/4269693/pexels-photo-4269693.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-004".to_owned(),
            name: "Elite Dental Pondok Indah".to_owned(),
            address: "Jl. Metro Pondok Indah No. 321, Pondok Indah, Jakarta Selatan".to_owned(),
            phone: "+62 21 5555 4567".to_owned(),
            email: "reception@elitedental.id".to_owned(),
            website: Some("https://elitedental.id".to_owned()),
            specialties: owned(&["Oral Surgery", "Prosthodontics", "Endodontics"]),
            rating: 4.9,
            open_hours: OpenHours {
                weekdays: "07:00 - 20:00".to_owned(),
                saturday: "08:00 - 17:00".to_owned(),
                sunday: "09:00 - 15:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2659,
                lng: 106.7844,
            },
            description: "Premium dental clinic offering comprehensive oral health services."
                .to_owned(),
            image: "https://images.pexels.com/photos/3845545/pexels-photo-3845545.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-005".to_owned(),
            name: "Dental Care Kelapa Gading".to_owned(),
            address: "Mall of Indonesia, Lt. 3, Kelapa Gading, Jakarta Utara".to_owned(),
            phone: "+62 21 5555 5678".to_owned(),
            email: "info@dentalcarekg.com".to_owned(),
            website: None,
            specialties: owned(&["General Dentistry", "Teeth Whitening", "Braces"]),
            rating: 4.5,
            open_hours: OpenHours {
                weekdays: "10:00 - 22:00".to_owned(),
                saturday: "10:00 - 22:00".to_owned(),
                sunday: "10:00 - 21:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.1588,
                lng: 106.9056,
            },
            description: "Conveniently located in mall with flexible hours and modern facilities."
                .to_owned(),
            image: "https://images.pexels.com/photos/3779709/pexels-photo-3779709.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-006".to_owned(),
            name: "Bright Smile Clinic".to_owned(),
            address: "Jl. Gatot Subroto No. 654, Setiabudi, Jakarta Selatan".to_owned(),
            phone: "+62 21 5555 6789".to_owned(),
            email: "hello@brightsmile.co.id".to_owned(),
            website: None,
            specialties: owned(&["Orthodontics", "Cosmetic Dentistry", "General Care"]),
            rating: 4.4,
            open_hours: OpenHours {
                weekdays: "08:30 - 19:30".to_owned(),
                saturday: "08:30 - 17:00".to_owned(),
                sunday: "Closed".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2297,
                lng: 106.8253,
            },
            description: "Focused on creating beautiful smiles with personalized treatment plans."
                .to_owned(),
            image: "https://images.pexels.com/photos/3845126/pexels-photo-3845126.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-007".to_owned(),
            name: "Family Dental Clinic".to_owned(),
            address: "Jl. Cikini Raya No. 987, Cikini, Jakarta Pusat".to_owned(),
            phone: "+62 21 5555 7890".to_owned(),
            email: "care@familydental.id".to_owned(),
            website: None,
            specialties: owned(&["Family Dentistry", "Preventive Care", "Dental Hygiene"]),
            rating: 4.3,
            open_hours: OpenHours {
                weekdays: "09:00 - 18:00".to_owned(),
                saturday: "09:00 - 15:00".to_owned(),
                sunday: "Closed".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.1944,
                lng: 106.8456,
            },
            description: "Comprehensive family dental care with emphasis on preventive \
                          treatments."
                .to_owned(),
            image: "https://images.pexels.com/photos/4269693/pexels-photo-4269693.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-008".to_owned(),
            name: "Modern Dental PIK".to_owned(),
            address: "Pantai Indah Kapuk, Jl. Pantai Indah Utara No. 147, Jakarta Utara"
                .to_owned(),
            phone: "+62 21 5555 8901".to_owned(),
            email: "info@moderndentalpik.com".to_owned(),
            website: Some("https://moderndentalpik.com".to_owned()),
            specialties: owned(&["Digital Dentistry", "Implants", "Laser Treatment"]),
            rating: 4.7,
            open_hours: OpenHours {
                weekdays: "08:00 - 20:00".to_owned(),
                saturday: "08:00 - 18:00".to_owned(),
                sunday: "10:00 - 16:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.1088,
                lng: 106.7539,
            },
            description: "Cutting-edge dental technology with digital imaging and laser \
                          treatments."
                .to_owned(),
            image: "https://images.pexels.com/photos/3845545/pexels-photo-3845545.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-009".to_owned(),
            name: "Dental Wellness Center".to_owned(),
            address: "Jl. Rasuna Said No. 258, Kuningan, Jakarta Selatan".to_owned(),
            phone: "+62 21 5555 9012".to_owned(),
            email: "wellness@dentalwellness.id".to_owned(),
            website: None,
            specialties: owned(&["Holistic Dentistry", "TMJ Treatment", "Sleep Apnea"]),
            rating: 4.6,
            open_hours: OpenHours {
                weekdays: "07:30 - 19:00".to_owned(),
                saturday: "08:00 - 16:00".to_owned(),
                sunday: "09:00 - 14:00".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2297,
                lng: 106.8317,
            },
            description: "Holistic approach to dental health with focus on overall wellness."
                .to_owned(),
            image: "https://images.pexels.com/photos/3779709/pexels-photo-3779709.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
        Clinic {
            id: "clinic-010".to_owned(),
            name: "Jakarta Orthodontic Center".to_owned(),
            address: "Jl. HR Rasuna Said No. 369, Menteng Dalam, Jakarta Selatan".to_owned(),
            phone: "+62 21 5555 0123".to_owned(),
            email: "ortho@jakartaortho.com".to_owned(),
            website: Some("https://jakartaortho.com".to_owned()),
            specialties: owned(&["Orthodontics", "Invisalign", "Jaw Surgery"]),
            rating: 4.8,
            open_hours: OpenHours {
                weekdays: "08:00 - 19:00".to_owned(),
                saturday: "08:00 - 17:00".to_owned(),
                sunday: "By Appointment".to_owned(),
            },
            coordinates: Coordinates {
                lat: -6.2297,
                lng: 106.8456,
            },
            description: "Specialized orthodontic center with latest braces and alignment \
                          technologies."
                .to_owned(),
            image: "https://images.pexels.com/photos/3845126/pexels-photo-3845126.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_owned(),
        },
    ]
});

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn encyclopedia_has_three_conditions() {
        let ids: Vec<&str> = conditions().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["caries", "cracks", "gingivitis"]);
    }

    #[test]
    fn every_condition_lists_five_symptoms() {
        for condition in conditions() {
            assert_eq!(condition.symptoms.len(), 5, "condition {}", condition.id);
        }
    }

    #[test]
    fn every_condition_has_a_detail_body() {
        for condition in conditions() {
            let detail = &condition.detail;
            assert!(detail.title.starts_with("Understanding"));
            assert!(!detail.intro.is_empty());
            assert_eq!(detail.sections.len(), 2, "condition {}", condition.id);
            assert!(detail.video_url.starts_with("https://www.youtube.com/embed/"));
        }
    }

    #[test]
    fn condition_lookup_by_id() {
        let caries = condition_by_id("caries").unwrap();
        assert_eq!(caries.name, "Dental Caries (Cavities)");
        assert_eq!(caries.detail.sections[0].cards.len(), 4);
        assert_eq!(caries.detail.sections[1].tips.len(), 5);
        assert!(condition_by_id("plaque").is_none());
    }

    #[test]
    fn gingivitis_detail_uses_tip_groups() {
        let gingivitis = condition_by_id("gingivitis").unwrap();
        let treatment = &gingivitis.detail.sections[1];
        assert_eq!(treatment.title, "Prevention and Treatment");
        assert_eq!(treatment.groups.len(), 2);
        assert_eq!(treatment.groups[0].title, "Daily Oral Care");
        assert_eq!(treatment.groups[1].tips.len(), 3);
    }

    #[test]
    fn study_list_has_three_entries() {
        assert_eq!(studies().len(), 3);
        assert_eq!(studies()[0].year, 2022);
        assert_eq!(studies()[0].authors.len(), 9);
        assert_eq!(studies()[1].year, 2025);
    }

    #[test]
    fn team_has_four_members() {
        assert_eq!(team().len(), 4);
        assert_eq!(team()[0].role, "Lead Developer");
        assert!(team().iter().all(|m| !m.bio.is_empty()));
    }

    #[test]
    fn directory_has_ten_jakarta_clinics() {
        assert_eq!(clinics().len(), 10);
        for (index, clinic) in clinics().iter().enumerate() {
            assert_eq!(clinic.id, format!("clinic-{:03}", index + 1));
            assert_eq!(clinic.specialties.len(), 3, "clinic {}", clinic.id);
            assert!(
                (0.0..=5.0).contains(&clinic.rating),
                "clinic {} rating out of range",
                clinic.id
            );
        }
    }

    #[test]
    fn clinic_websites_are_optional() {
        let with_site: Vec<&str> = clinics()
            .iter()
            .filter(|c| c.website.is_some())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            with_site,
            vec!["clinic-001", "clinic-004", "clinic-008", "clinic-010"]
        );
    }

    #[test]
    fn clinic_hours_include_non_range_values() {
        let smile_care = &clinics()[1];
        assert_eq!(smile_care.open_hours.sunday, "Closed");
        let ortho = &clinics()[9];
        assert_eq!(ortho.open_hours.sunday, "By Appointment");
    }

    #[test]
    fn clinic_coordinates_are_in_jakarta() {
        for clinic in clinics() {
            assert!(
                (-6.4..=-6.0).contains(&clinic.coordinates.lat),
                "clinic {} latitude",
                clinic.id
            );
            assert!(
                (106.5..=107.0).contains(&clinic.coordinates.lng),
                "clinic {} longitude",
                clinic.id
            );
        }
    }
}
