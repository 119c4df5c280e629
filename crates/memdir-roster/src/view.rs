//! The directory listing: search, filter, sort, paginate.

use memdir_model::{AddressTables, Member};

/// Sort order over member first names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

/// Default page size of the member grid.
pub const DEFAULT_PER_PAGE: usize = 9;

/// An in-memory view over the loaded roster.
///
/// Search matches case-insensitively across first name, last name,
/// status text, and the member's resolved province name. Sorting is
/// byte-wise over first names (stable for a fixed roster; locale
/// collation not attempted). Pages are 1-based; changing the search
/// term resets to page 1.
#[derive(Debug)]
pub struct RosterView {
    members: Vec<Member>,
    search: String,
    province_filter: Option<i64>,
    sort: SortDirection,
    page: usize,
    per_page: usize,
}

impl RosterView {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            search: String::new(),
            province_filter: None,
            sort: SortDirection::None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
        self.page = 1;
    }

    pub fn set_province_filter(&mut self, province_id: Option<i64>) {
        self.province_filter = province_id;
    }

    pub fn set_sort(&mut self, sort: SortDirection) {
        self.sort = sort;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, tables: &dyn AddressTables) {
        let total = self.total_pages(tables);
        if self.page < total {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }

    pub fn last_page(&mut self, tables: &dyn AddressTables) {
        self.page = self.total_pages(tables).max(1);
    }

    /// All members passing the filter, in the configured order.
    pub fn visible<'a>(&'a self, tables: &dyn AddressTables) -> Vec<&'a Member> {
        let mut list: Vec<&Member> = self
            .members
            .iter()
            .filter(|member| self.passes_province_filter(member))
            .filter(|member| self.matches_search(member, tables))
            .collect();

        match self.sort {
            SortDirection::None => {}
            SortDirection::Asc => list.sort_by(|a, b| {
                a.firstname
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.firstname.as_deref().unwrap_or(""))
            }),
            SortDirection::Desc => list.sort_by(|a, b| {
                b.firstname
                    .as_deref()
                    .unwrap_or("")
                    .cmp(a.firstname.as_deref().unwrap_or(""))
            }),
        }
        list
    }

    /// The current page of the visible list.
    pub fn page_members<'a>(&'a self, tables: &dyn AddressTables) -> Vec<&'a Member> {
        let list = self.visible(tables);
        let start = (self.page - 1).saturating_mul(self.per_page);
        list.into_iter().skip(start).take(self.per_page).collect()
    }

    pub fn total_pages(&self, tables: &dyn AddressTables) -> usize {
        self.visible(tables).len().div_ceil(self.per_page)
    }

    fn passes_province_filter(&self, member: &Member) -> bool {
        let Some(wanted) = self.province_filter else {
            return true;
        };
        member_province_id(member) == Some(wanted)
    }

    fn matches_search(&self, member: &Member, tables: &dyn AddressTables) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let province_name = member_province_id(member)
            .and_then(|id| tables.province_name(id))
            .unwrap_or("");

        contains_ci(member.firstname.as_deref(), &self.search)
            || contains_ci(member.lastname.as_deref(), &self.search)
            || contains_ci(member.alive.map(|a| a.as_wire()), &self.search)
            || contains_ci(Some(province_name), &self.search)
    }
}

fn member_province_id(member: &Member) -> Option<i64> {
    member
        .address
        .as_ref()?
        .address_object
        .as_ref()?
        .province_id
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle_lower))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{RosterView, SortDirection};
    use memdir_model::{
        AddressTables, AddressValue, AliveStatus, District, Member, MemberAddress, Province,
        Subdistrict,
    };

    struct Tables {
        provinces: Vec<Province>,
    }

    impl AddressTables for Tables {
        fn provinces(&self) -> &[Province] {
            &self.provinces
        }
        fn districts(&self) -> &[District] {
            &[]
        }
        fn subdistricts(&self) -> &[Subdistrict] {
            &[]
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
        }
    }

    fn member(firstname: &str, province_id: Option<i64>) -> Member {
        Member {
            firstname: Some(firstname.to_string()),
            lastname: Some("ทดสอบ".to_string()),
            alive: Some(AliveStatus::Alive),
            address: province_id.map(|id| MemberAddress {
                line1: None,
                address_object: Some(AddressValue {
                    province_id: Some(id),
                    ..AddressValue::default()
                }),
            }),
            ..Member::default()
        }
    }

    #[test]
    fn search_matches_province_name() {
        let mut view = RosterView::new(vec![
            member("Alice", Some(1)),
            member("Bob", Some(3)),
            member("Carol", None),
        ]);
        view.set_search("นนทบุรี");
        let names: Vec<_> = view
            .visible(&tables())
            .iter()
            .map(|m| m.firstname.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Bob"]);
    }

    #[test]
    fn search_matches_status_text() {
        let mut deceased = member("Dan", Some(1));
        deceased.alive = Some(AliveStatus::Deceased);
        let mut view = RosterView::new(vec![member("Alice", Some(1)), deceased]);
        view.set_search("เสียชีวิต");
        assert_eq!(view.visible(&tables()).len(), 1);
    }

    #[test]
    fn sort_orders_by_first_name() {
        let mut view = RosterView::new(vec![
            member("Carol", None),
            member("Alice", None),
            member("Bob", None),
        ]);
        view.set_sort(SortDirection::Asc);
        let names: Vec<_> = view
            .visible(&tables())
            .iter()
            .map(|m| m.firstname.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        view.set_sort(SortDirection::Desc);
        let names: Vec<_> = view
            .visible(&tables())
            .iter()
            .map(|m| m.firstname.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn pagination_is_one_based_and_search_resets_page() {
        let members: Vec<Member> = (0..7).map(|i| member(&format!("M{i}"), None)).collect();
        let mut view = RosterView::new(members).with_per_page(3);
        let tables = tables();

        assert_eq!(view.total_pages(&tables), 3);
        assert_eq!(view.page_members(&tables).len(), 3);

        view.set_page(3);
        assert_eq!(view.page_members(&tables).len(), 1);

        view.next_page(&tables);
        assert_eq!(view.page(), 3);

        view.set_search("m");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn province_filter_narrows_the_list() {
        let mut view = RosterView::new(vec![
            member("Alice", Some(1)),
            member("Bob", Some(3)),
            member("Carol", None),
        ]);
        view.set_province_filter(Some(1));
        assert_eq!(view.visible(&tables()).len(), 1);
        view.set_province_filter(None);
        assert_eq!(view.visible(&tables()).len(), 3);
    }
}
