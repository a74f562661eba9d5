use encadre_common::territory::{self, Territory};

use crate::emit;
use crate::terminal::print;

pub fn territories() {
    print::set_key_width(&["Postcodes"]);

    print::tree_head(0, Territory::Paris.label());
    print::aligned_line("Postcodes", "75xxx");
    emit!();

    print::tree_head(1, Territory::EstEnsemble.label());
    for postcode in territory::est_ensemble_postcodes() {
        let city = territory::est_ensemble_city(postcode).unwrap_or_default();
        print::aligned_line(postcode, city);
    }
}
