// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mycash::config::{self, Settings};
use mycash::db;
use mycash::lifecycle::RecurringInstallmentPolicy;
use mycash::models::NewFamilyMember;
use mycash::store::Store;

#[test]
fn data_and_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mycash.sqlite");

    {
        let conn = db::open_at(&path).unwrap();
        config::set_setting(&conn, config::KEY_USER, "familia-marte").unwrap();
        config::set_setting(&conn, config::KEY_RECURRING_INSTALLMENTS, "reject").unwrap();
        let settings = Settings::load(&conn).unwrap();
        let store = Store::new(&conn, settings.user.as_str());
        store.seed_default_categories().unwrap();
        store
            .insert_member(&NewFamilyMember {
                name: "Lucas Marte".to_string(),
                role: "Pai".to_string(),
                avatar_url: None,
                email: None,
                monthly_income: None,
            })
            .unwrap();
    }

    let conn = db::open_at(&path).unwrap();
    let settings = Settings::load(&conn).unwrap();
    assert_eq!(settings.user, "familia-marte");
    assert_eq!(settings.recurring_installments, RecurringInstallmentPolicy::Reject);

    let store = Store::new(&conn, settings.user.as_str());
    let members = store.list_members().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Lucas Marte");
    // reopening runs the schema again without clobbering rows
    assert_eq!(store.seed_default_categories().unwrap(), 0);
}
