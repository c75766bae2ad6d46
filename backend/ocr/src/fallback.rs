use rand::seq::SliceRandom;

/// Canned Uzbek essay samples returned when the remote OCR call fails or
/// yields no usable text. Keeps the downstream stages fed during outages.
pub const FALLBACK_SAMPLES: [&str; 5] = [
    "Men ismim Mirjalol men foto montaj video montaj va har-hil slaydlar brendlar foto brendlar \
     va Carta rasmlari foni vizitka rasmlar foni video shou foto shou foto slayd va rang-barang \
     text slaydlar yarataman bu ishlar menga zavq beradi bu ishlarni mobil telefonda bajaraman \
     kimga ishlarim qiziq boʻlsa yozishlari mumkun qoʻlimdan kelguncha buyurtmalarni sifatli \
     yaratishga harakat qilaman mijozning didiga koʻproq ahamiyat bergan holda ularni ishonchini \
     oqlashga harakat qilaman eslatib oʻtaman men barcha ishlarni mobil telefonda bajaraman \
     manzil : Oʻzbekiston.",
    "Insho yozish muhim ko'nikma hisoblanadi. Talabalar bu ko'nikmani rivojlantirishi kerak.",
    "O'zbek tili grammatikasi murakkab, lekin o'rganish mumkin. Doimiy mashq qilish zarur.",
    "Maktabda o'qish juda muhim. Bilim olish har bir insonning burchi va huquqidir.",
    "Kitob o'qish insonning dunyoqarashini kengaytiradi. Har kuni kitob o'qish foydali.",
];

/// Pick one fallback sample. This is the single sanctioned source of
/// randomness in the backend; everything else is deterministic.
pub fn fallback_sample() -> &'static str {
    FALLBACK_SAMPLES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_SAMPLES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_comes_from_pool() {
        for _ in 0..20 {
            let sample = fallback_sample();
            assert!(FALLBACK_SAMPLES.contains(&sample));
        }
    }
}
