//! The three-level Thai address selector
//! (จังหวัด -> อำเภอ/เขต -> ตำบล/แขวง, plus the derived postal code).

use tracing::debug;

use memdir_model::{AddressValue, District, Province, Subdistrict};

use crate::control::{ChangeFn, EmitTiming, FormControl, HostBinding, TouchedFn};
use crate::tables::TableSlot;

type Selection = (Option<i64>, Option<i64>, Option<i64>);

/// Cascading province/district/subdistrict selector.
///
/// The governing transition rule: changing a level always clears every
/// strictly deeper level, even when the old deeper selection would still
/// be valid under the new parent. Host-written values are validated
/// top-down against the loaded tables; while any table is still in
/// flight the latest written value stays buffered and validation re-runs
/// on every table arrival, idempotently, until all three are ready.
pub struct AddressSelector {
    provinces: TableSlot<Province>,
    districts: TableSlot<District>,
    subdistricts: TableSlot<Subdistrict>,
    selected_province: Option<i64>,
    selected_district: Option<i64>,
    selected_subdistrict: Option<i64>,
    disabled: bool,
    pending_write: Option<Option<AddressValue>>,
    binding: HostBinding<AddressValue>,
}

impl AddressSelector {
    pub fn new() -> Self {
        Self::with_emit_timing(EmitTiming::Immediate)
    }

    pub fn with_emit_timing(timing: EmitTiming) -> Self {
        Self {
            provinces: TableSlot::Pending,
            districts: TableSlot::Pending,
            subdistricts: TableSlot::Pending,
            selected_province: None,
            selected_district: None,
            selected_subdistrict: None,
            disabled: false,
            pending_write: None,
            binding: HostBinding::new(timing),
        }
    }

    // --- reference table arrival ---

    pub fn install_provinces(&mut self, rows: Vec<Province>) {
        if !self.provinces.install(rows) {
            debug!("province table already installed; ignoring re-delivery");
            return;
        }
        self.revalidate_pending();
    }

    pub fn install_districts(&mut self, rows: Vec<District>) {
        if !self.districts.install(rows) {
            debug!("district table already installed; ignoring re-delivery");
            return;
        }
        self.revalidate_pending();
    }

    pub fn install_subdistricts(&mut self, rows: Vec<Subdistrict>) {
        if !self.subdistricts.install(rows) {
            debug!("subdistrict table already installed; ignoring re-delivery");
            return;
        }
        self.revalidate_pending();
    }

    pub fn tables_ready(&self) -> bool {
        self.provinces.is_ready() && self.districts.is_ready() && self.subdistricts.is_ready()
    }

    // --- user-driven transitions ---

    /// Select a province. Unknown ids clear the slot. Either way every
    /// deeper level is cleared.
    pub fn select_province(&mut self, id: i64) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        self.pending_write = None;
        if self.province_row(id).is_some() {
            self.selected_province = Some(id);
        } else {
            debug!(id, "province not in table; clearing slot");
            self.selected_province = None;
        }
        self.selected_district = None;
        self.selected_subdistrict = None;
        self.after_user_change(before);
    }

    /// Select a district. Accepted only when a province is selected and
    /// the district belongs to it; rejects clear the slot. The
    /// subdistrict is cleared unconditionally.
    pub fn select_district(&mut self, id: i64) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        self.pending_write = None;
        let valid = self
            .selected_province
            .is_some_and(|pid| self.district_row(id).is_some_and(|d| d.province_id == pid));
        if valid {
            self.selected_district = Some(id);
        } else {
            debug!(id, "district rejected; clearing slot");
            self.selected_district = None;
        }
        self.selected_subdistrict = None;
        self.after_user_change(before);
    }

    /// Select a subdistrict, gated on the selected district the same way.
    pub fn select_subdistrict(&mut self, id: i64) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        self.pending_write = None;
        let valid = self.selected_district.is_some_and(|did| {
            self.subdistrict_row(id)
                .is_some_and(|s| s.district_id == did)
        });
        if valid {
            self.selected_subdistrict = Some(id);
        } else {
            debug!(id, "subdistrict rejected; clearing slot");
            self.selected_subdistrict = None;
        }
        self.after_user_change(before);
    }

    // --- derived state ---

    /// All provinces in display order. Empty while the table is pending.
    pub fn province_options(&self) -> Vec<&Province> {
        let mut options: Vec<&Province> = self
            .provinces
            .rows()
            .map(|rows| rows.iter().collect())
            .unwrap_or_default();
        options.sort_by(|a, b| a.name_th.cmp(&b.name_th).then_with(|| a.id.cmp(&b.id)));
        options
    }

    /// Districts of the selected province, in display order. Empty when
    /// no province is selected or the table is pending.
    pub fn district_options(&self) -> Vec<&District> {
        let Some(pid) = self.selected_province else {
            return Vec::new();
        };
        let mut options: Vec<&District> = self
            .districts
            .rows()
            .map(|rows| rows.iter().filter(|d| d.province_id == pid).collect())
            .unwrap_or_default();
        options.sort_by(|a, b| a.name_th.cmp(&b.name_th).then_with(|| a.id.cmp(&b.id)));
        options
    }

    /// Subdistricts of the selected district, in display order.
    pub fn subdistrict_options(&self) -> Vec<&Subdistrict> {
        let Some(did) = self.selected_district else {
            return Vec::new();
        };
        let mut options: Vec<&Subdistrict> = self
            .subdistricts
            .rows()
            .map(|rows| rows.iter().filter(|s| s.district_id == did).collect())
            .unwrap_or_default();
        options.sort_by(|a, b| a.name_th.cmp(&b.name_th).then_with(|| a.id.cmp(&b.id)));
        options
    }

    /// Postal code derived from the selected subdistrict.
    pub fn zip_code(&self) -> Option<String> {
        let sid = self.selected_subdistrict?;
        self.subdistrict_row(sid).map(|s| s.zip_code.clone())
    }

    /// `(province, district, subdistrict)` ids.
    pub fn selection(&self) -> Selection {
        (
            self.selected_province,
            self.selected_district,
            self.selected_subdistrict,
        )
    }

    /// The external value: `Some` only when all three levels are
    /// selected, with the derived postal code attached.
    pub fn value(&self) -> Option<AddressValue> {
        let (Some(province_id), Some(district_id), Some(subdistrict_id)) = self.selection() else {
            return None;
        };
        Some(AddressValue {
            province_id: Some(province_id),
            district_id: Some(district_id),
            subdistrict_id: Some(subdistrict_id),
            zip_code: self.zip_code(),
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_touched(&self) -> bool {
        self.binding.is_touched()
    }

    /// Deliver a parked emission when running with deferred timing.
    pub fn flush_emission(&mut self) {
        self.binding.flush();
    }

    // --- internals ---

    fn after_user_change(&mut self, before: Selection) {
        if self.selection() == before {
            return;
        }
        self.binding.touch();
        let value = self.value();
        self.binding.emit(value);
    }

    /// Re-run validation of the buffered host value. Runs once per
    /// table arrival; each run recomputes the full selection from the
    /// same buffered value, so arrival order cannot change the outcome.
    fn revalidate_pending(&mut self) {
        let Some(pending) = self.pending_write.clone() else {
            return;
        };
        self.apply_external(pending.as_ref());
        if self.tables_ready() {
            self.pending_write = None;
        }
    }

    /// Top-down validation of a host-written value against whichever
    /// tables have arrived. Levels whose backing table is pending, whose
    /// id has no row, or whose parent link mismatches are cleared along
    /// with everything below them. Never emits.
    fn apply_external(&mut self, value: Option<&AddressValue>) {
        let Some(value) = value else {
            self.selected_province = None;
            self.selected_district = None;
            self.selected_subdistrict = None;
            return;
        };

        let province = value
            .province_id
            .filter(|&id| self.province_row(id).is_some());
        let district = match (province, value.district_id) {
            (Some(pid), Some(id)) => self
                .district_row(id)
                .filter(|d| d.province_id == pid)
                .map(|d| d.id),
            _ => None,
        };
        let subdistrict = match (district, value.subdistrict_id) {
            (Some(did), Some(id)) => self
                .subdistrict_row(id)
                .filter(|s| s.district_id == did)
                .map(|s| s.id),
            _ => None,
        };

        if province.is_none() && value.province_id.is_some() {
            debug!(?value.province_id, "written province did not validate");
        }

        self.selected_province = province;
        self.selected_district = district;
        self.selected_subdistrict = subdistrict;
    }

    fn province_row(&self, id: i64) -> Option<&Province> {
        self.provinces.rows()?.iter().find(|p| p.id == id)
    }

    fn district_row(&self, id: i64) -> Option<&District> {
        self.districts.rows()?.iter().find(|d| d.id == id)
    }

    fn subdistrict_row(&self, id: i64) -> Option<&Subdistrict> {
        self.subdistricts.rows()?.iter().find(|s| s.id == id)
    }
}

impl Default for AddressSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for AddressSelector {
    type Write = AddressValue;
    type Emit = AddressValue;

    fn write_value(&mut self, value: Option<AddressValue>) {
        self.pending_write = Some(value);
        self.revalidate_pending();
    }

    fn register_on_change(&mut self, callback: ChangeFn<AddressValue>) {
        self.binding.register_on_change(callback);
    }

    fn register_on_touched(&mut self, callback: TouchedFn) {
        self.binding.register_on_touched(callback);
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
