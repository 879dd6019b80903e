//! Single-selection choice group, used for the MFA method picker.

// self
use crate::{_prelude::*, widget::Widget};

/// Delivery channels for the one-time code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaMethod {
	/// Code sent to the registered email address.
	Email,
	/// Code sent to the registered mobile number.
	Sms,
}
impl MfaMethod {
	/// Every method, in picker order.
	pub const ALL: [MfaMethod; 2] = [MfaMethod::Email, MfaMethod::Sms];

	/// Stable label used in claims and persisted records.
	pub const fn as_str(self) -> &'static str {
		match self {
			MfaMethod::Email => "email",
			MfaMethod::Sms => "sms",
		}
	}

	/// Picker label.
	pub const fn label(self) -> &'static str {
		match self {
			MfaMethod::Email => "Email",
			MfaMethod::Sms => "Text message",
		}
	}
}
impl Display for MfaMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One selectable entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceOption<T> {
	/// The value the entry selects.
	pub value: T,
	/// Entry label.
	pub label: String,
	/// Optional hint rendered under the label, e.g. a masked destination.
	pub hint: Option<String>,
}

/// View description for the choice group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceGroupView<T> {
	/// Entries in display order.
	pub options: Vec<ChoiceOption<T>>,
	/// Index of the selected entry.
	pub selected: usize,
	/// Whether the group accepts input.
	pub enabled: bool,
}

/// Exactly-one-selected option group.
///
/// The first option is selected from the start, so the group is always valid; there is no
/// unselected state to guard against.
#[derive(Clone, Debug)]
pub struct ChoiceGroup<T> {
	options: Vec<ChoiceOption<T>>,
	selected: usize,
	enabled: bool,
}
impl<T> ChoiceGroup<T>
where
	T: Clone,
{
	/// Creates a group from at least one option; the first is pre-selected.
	pub fn new(options: Vec<ChoiceOption<T>>) -> Self {
		debug_assert!(!options.is_empty(), "A choice group needs at least one option.");

		Self { options, selected: 0, enabled: true }
	}

	/// Selects the entry at `index`; returns `true` if the selection changed.
	pub fn select(&mut self, index: usize) -> bool {
		if !self.enabled || index >= self.options.len() || index == self.selected {
			return false;
		}

		self.selected = index;

		true
	}

	/// Index of the selected entry.
	pub fn selected_index(&self) -> usize {
		self.selected
	}

	/// Entries in display order.
	pub fn options(&self) -> &[ChoiceOption<T>] {
		&self.options
	}

	/// Pure state → view description.
	pub fn view(&self) -> ChoiceGroupView<T> {
		ChoiceGroupView {
			options: self.options.clone(),
			selected: self.selected,
			enabled: self.enabled,
		}
	}
}
impl ChoiceGroup<MfaMethod> {
	/// The standard MFA method picker, email first.
	pub fn mfa_methods() -> Self {
		Self::new(
			MfaMethod::ALL
				.into_iter()
				.map(|value| ChoiceOption { value, label: value.label().to_owned(), hint: None })
				.collect(),
		)
	}
}
impl<T> Widget for ChoiceGroup<T>
where
	T: Clone + PartialEq,
{
	type Value = T;

	fn value(&self) -> T {
		self.options[self.selected].value.clone()
	}

	fn set_value(&mut self, value: T) {
		if let Some(index) = self.options.iter().position(|option| option.value == value) {
			self.selected = index;
		}
	}

	fn is_valid(&self) -> bool {
		true
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn reset(&mut self) {
		self.selected = 0;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn first_option_is_pre_selected() {
		let group = ChoiceGroup::mfa_methods();

		assert_eq!(group.value(), MfaMethod::Email);
		assert!(group.is_valid());
	}

	#[test]
	fn select_reports_changes_only() {
		let mut group = ChoiceGroup::mfa_methods();

		assert!(group.select(1));
		assert_eq!(group.value(), MfaMethod::Sms);
		assert!(!group.select(1), "Re-selecting the current entry is not a change.");
		assert!(!group.select(7), "Out-of-range indexes are ignored.");
	}

	#[test]
	fn disabled_group_keeps_its_selection() {
		let mut group = ChoiceGroup::mfa_methods();

		group.set_enabled(false);

		assert!(!group.select(1));
		assert_eq!(group.value(), MfaMethod::Email);
	}

	#[test]
	fn set_value_selects_the_matching_option() {
		let mut group = ChoiceGroup::mfa_methods();

		group.set_value(MfaMethod::Sms);

		assert_eq!(group.selected_index(), 1);
	}

	#[test]
	fn mfa_method_serde_uses_lowercase_labels() {
		let encoded =
			serde_json::to_string(&MfaMethod::Sms).expect("Method should serialize to JSON.");

		assert_eq!(encoded, "\"sms\"");
	}
}
