//! Address rendering for display.

use memdir_model::{AddressTables, Member};

const NO_ADDRESS: &str = "ไม่มีข้อมูลที่อยู่";
const BANGKOK: &str = "กรุงเทพมหานคร";

/// Render a member's address as a single display line.
///
/// Bangkok addresses use the แขวง/เขต administrative labels; every
/// other province uses the ต./อ./จ. abbreviations. A member without
/// a structured address falls back to the free-text first line, and a
/// member without any address at all to a fixed placeholder.
pub fn full_address(member: &Member, tables: &dyn AddressTables) -> String {
    let Some(address) = member.address.as_ref() else {
        return NO_ADDRESS.to_string();
    };
    let line1 = address.line1.as_deref().unwrap_or("").trim();

    let Some(value) = address.address_object.as_ref() else {
        return if line1.is_empty() {
            NO_ADDRESS.to_string()
        } else {
            line1.to_string()
        };
    };

    let province = value.province_id.and_then(|id| tables.province_name(id));
    let district = value.district_id.and_then(|id| tables.district_name(id));
    let subdistrict = value
        .subdistrict_id
        .and_then(|id| tables.subdistrict_name(id));

    let (Some(province), Some(district), Some(subdistrict)) = (province, district, subdistrict)
    else {
        return if line1.is_empty() {
            NO_ADDRESS.to_string()
        } else {
            line1.to_string()
        };
    };

    let zip = value.zip_code.as_deref().unwrap_or("");
    let rendered = if province == BANGKOK {
        format!("{line1} แขวง{subdistrict} {district} {province} {zip}")
    } else {
        format!("{line1} ต.{subdistrict} อ.{district} จ.{province} {zip}")
    };
    rendered.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{NO_ADDRESS, full_address};
    use memdir_model::{
        AddressTables, AddressValue, District, Member, MemberAddress, Province, Subdistrict,
    };

    struct Tables {
        provinces: Vec<Province>,
        districts: Vec<District>,
        subdistricts: Vec<Subdistrict>,
    }

    impl AddressTables for Tables {
        fn provinces(&self) -> &[Province] {
            &self.provinces
        }
        fn districts(&self) -> &[District] {
            &self.districts
        }
        fn subdistricts(&self) -> &[Subdistrict] {
            &self.subdistricts
        }
    }

    fn tables() -> Tables {
        Tables {
            provinces: vec![
                Province {
                    id: 1,
                    name_th: "กรุงเทพมหานคร".to_string(),
                    name_en: "Bangkok".to_string(),
                },
                Province {
                    id: 3,
                    name_th: "นนทบุรี".to_string(),
                    name_en: "Nonthaburi".to_string(),
                },
            ],
            districts: vec![
                District {
                    id: 1001,
                    name_th: "เขตพระนคร".to_string(),
                    name_en: "Khet Phra Nakhon".to_string(),
                    province_id: 1,
                },
                District {
                    id: 3001,
                    name_th: "เมืองนนทบุรี".to_string(),
                    name_en: "Mueang Nonthaburi".to_string(),
                    province_id: 3,
                },
            ],
            subdistricts: vec![
                Subdistrict {
                    id: 100101,
                    name_th: "พระบรมมหาราชวัง".to_string(),
                    name_en: "Phra Borom Maha Ratchawang".to_string(),
                    district_id: 1001,
                    zip_code: "10200".to_string(),
                },
                Subdistrict {
                    id: 300101,
                    name_th: "สวนใหญ่".to_string(),
                    name_en: "Suan Yai".to_string(),
                    district_id: 3001,
                    zip_code: "11000".to_string(),
                },
            ],
        }
    }

    fn member_with(line1: Option<&str>, value: Option<AddressValue>) -> Member {
        Member {
            address: Some(MemberAddress {
                line1: line1.map(str::to_string),
                address_object: value,
            }),
            ..Member::default()
        }
    }

    #[test]
    fn bangkok_uses_khwaeng_khet_labels() {
        let member = member_with(
            Some("99/1 ถนนพระอาทิตย์"),
            Some(AddressValue {
                province_id: Some(1),
                district_id: Some(1001),
                subdistrict_id: Some(100101),
                zip_code: Some("10200".to_string()),
            }),
        );
        assert_eq!(
            full_address(&member, &tables()),
            "99/1 ถนนพระอาทิตย์ แขวงพระบรมมหาราชวัง เขตพระนคร กรุงเทพมหานคร 10200"
        );
    }

    #[test]
    fn provinces_use_abbreviated_labels() {
        let member = member_with(
            Some("12 หมู่ 4"),
            Some(AddressValue {
                province_id: Some(3),
                district_id: Some(3001),
                subdistrict_id: Some(300101),
                zip_code: Some("11000".to_string()),
            }),
        );
        assert_eq!(
            full_address(&member, &tables()),
            "12 หมู่ 4 ต.สวนใหญ่ อ.เมืองนนทบุรี จ.นนทบุรี 11000"
        );
    }

    #[test]
    fn missing_structured_address_falls_back_to_line1() {
        let member = member_with(Some("99/1"), None);
        assert_eq!(full_address(&member, &tables()), "99/1");
    }

    #[test]
    fn missing_address_renders_placeholder() {
        assert_eq!(full_address(&Member::default(), &tables()), NO_ADDRESS);
        let member = member_with(None, None);
        assert_eq!(full_address(&member, &tables()), NO_ADDRESS);
    }

    #[test]
    fn unresolvable_ids_fall_back_to_line1() {
        let member = member_with(
            Some("99/1"),
            Some(AddressValue {
                province_id: Some(9999),
                district_id: Some(1001),
                subdistrict_id: Some(100101),
                zip_code: None,
            }),
        );
        assert_eq!(full_address(&member, &tables()), "99/1");
    }
}
